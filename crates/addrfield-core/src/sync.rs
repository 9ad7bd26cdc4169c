//! Decides when a selection is written to the order attributes.
//!
//! A field is written when its (key, value) pair changes and the value is
//! non-empty. Clearing a selection writes nothing, so the last written
//! attribute stays on the order.
//!
//! Each request carries a [`PersistTicket`]. The executor checks the ticket
//! right before writing and skips requests a newer value has superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::settings::Field;

/// Payload for the host's attribute-write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct PersistTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl PersistTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` once a newer request for the same field has been issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }
}

#[derive(Debug, Clone)]
pub struct PersistRequest {
    pub field: Field,
    pub change: AttributeChange,
    pub ticket: PersistTicket,
}

#[derive(Debug, Default)]
struct Slot {
    key: String,
    value: String,
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Default)]
pub struct AttributeSync {
    slots: [Slot; 3],
}

impl AttributeSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current key and value for `field` and returns a write
    /// request if either changed and the value is non-empty.
    pub fn observe(&mut self, field: Field, key: &str, value: &str) -> Option<PersistRequest> {
        let slot = &mut self.slots[field.index()];
        if slot.key == key && slot.value == value {
            return None;
        }
        key.clone_into(&mut slot.key);
        value.clone_into(&mut slot.value);

        if value.is_empty() {
            return None;
        }

        let generation = slot.latest.fetch_add(1, Ordering::AcqRel) + 1;
        Some(PersistRequest {
            field,
            change: AttributeChange {
                key: key.to_owned(),
                value: value.to_owned(),
            },
            ticket: PersistTicket {
                generation,
                latest: Arc::clone(&slot.latest),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_never_persisted() {
        let mut sync = AttributeSync::new();
        assert!(sync.observe(Field::City, "City", "").is_none());
    }

    #[test]
    fn new_value_is_persisted_under_key() {
        let mut sync = AttributeSync::new();
        let request = sync.observe(Field::City, "City", "Bandung").unwrap();
        assert_eq!(request.field, Field::City);
        assert_eq!(
            request.change,
            AttributeChange {
                key: "City".to_owned(),
                value: "Bandung".to_owned(),
            }
        );
        assert!(request.ticket.is_current());
    }

    #[test]
    fn unchanged_value_is_not_persisted_twice() {
        let mut sync = AttributeSync::new();
        assert!(sync.observe(Field::District, "District", "Coblong").is_some());
        assert!(sync.observe(Field::District, "District", "Coblong").is_none());
    }

    #[test]
    fn key_change_repersists_current_value() {
        let mut sync = AttributeSync::new();
        assert!(sync.observe(Field::City, "City", "Bandung").is_some());
        let request = sync.observe(Field::City, "shipping_city", "Bandung").unwrap();
        assert_eq!(request.change.key, "shipping_city");
    }

    #[test]
    fn value_restored_after_clear_is_persisted_again() {
        let mut sync = AttributeSync::new();
        assert!(sync.observe(Field::City, "City", "Bandung").is_some());
        assert!(sync.observe(Field::City, "City", "").is_none());
        assert!(sync.observe(Field::City, "City", "Bandung").is_some());
    }

    #[test]
    fn newer_request_supersedes_older_ticket() {
        let mut sync = AttributeSync::new();
        let first = sync.observe(Field::City, "City", "Bandung").unwrap();
        let second = sync.observe(Field::City, "City", "Bogor").unwrap();
        assert!(!first.ticket.is_current());
        assert!(second.ticket.is_current());
        assert!(second.ticket.generation() > first.ticket.generation());
    }

    #[test]
    fn clearing_does_not_supersede_pending_write() {
        let mut sync = AttributeSync::new();
        let pending = sync.observe(Field::City, "City", "Bandung").unwrap();
        assert!(sync.observe(Field::City, "City", "").is_none());
        assert!(pending.ticket.is_current());
    }

    #[test]
    fn fields_are_tracked_independently() {
        let mut sync = AttributeSync::new();
        let city = sync.observe(Field::City, "City", "Bandung").unwrap();
        let district = sync.observe(Field::District, "District", "Coblong").unwrap();
        assert!(city.ticket.is_current());
        assert!(district.ticket.is_current());
    }
}
