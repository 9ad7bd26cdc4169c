//! Checkout-progress interception.
//!
//! [`evaluate`] is a pure function of the current state. Error messages are
//! only written when the host applies the returned decision through
//! [`InterceptDecision::perform`].

use crate::hierarchy::{OptionLists, SelectionState};
use crate::locale::{block_reason, validation_message, Language};
use crate::settings::{Field, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Block,
    Allow,
}

/// Inline error per field; `None` means no error is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    city: Option<String>,
    district: Option<String>,
    subdistrict: Option<String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::City => self.city.as_deref(),
            Field::District => self.district.as_deref(),
            Field::Subdistrict => self.subdistrict.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, message: String) {
        *self.slot_mut(field) = Some(message);
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::City => &mut self.city,
            Field::District => &mut self.district,
            Field::Subdistrict => &mut self.subdistrict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Perform {
    SetError { field: Field, message: String },
    ClearAll,
}

/// What the widget asks the host to do with checkout progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptDecision {
    behavior: Behavior,
    reason: Option<String>,
    perform: Perform,
}

impl InterceptDecision {
    #[must_use]
    pub fn allow() -> Self {
        Self {
            behavior: Behavior::Allow,
            reason: None,
            perform: Perform::ClearAll,
        }
    }

    fn block(field: Field, message: String) -> Self {
        Self {
            behavior: Behavior::Block,
            reason: Some(block_reason(field).to_owned()),
            perform: Perform::SetError { field, message },
        }
    }

    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// The field that triggered a block, if any.
    #[must_use]
    pub fn blocked_field(&self) -> Option<Field> {
        match &self.perform {
            Perform::SetError { field, .. } => Some(*field),
            Perform::ClearAll => None,
        }
    }

    /// Applies the deferred side effect once the host has settled on
    /// `result`. A block only shows its error if the host kept the block.
    pub fn perform(&self, result: Behavior, errors: &mut ValidationErrors) {
        match &self.perform {
            Perform::SetError { field, message } => {
                if result == Behavior::Block {
                    errors.set(*field, message.clone());
                }
            }
            Perform::ClearAll => errors.clear_all(),
        }
    }
}

/// State the gate looks at.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub settings: &'a Settings,
    pub language: &'a Language,
    pub options: &'a OptionLists,
    pub selection: &'a SelectionState,
    pub can_block_progress: bool,
}

/// Checks city, then district, then subdistrict. The first enabled field
/// with options on offer and nothing selected blocks.
#[must_use]
pub fn evaluate(input: &GateInput<'_>) -> InterceptDecision {
    if !input.can_block_progress {
        return InterceptDecision::allow();
    }

    let config = input.settings.field_config();
    let options = input.options;
    let selection = input.selection;
    let levels = [
        (Field::City, options.cities.as_slice(), selection.city.as_str()),
        (
            Field::District,
            options.districts.as_slice(),
            selection.district.as_str(),
        ),
        (
            Field::Subdistrict,
            options.subdistricts.as_slice(),
            selection.subdistrict.as_str(),
        ),
    ];

    for (field, offered, selected) in levels {
        if config.is_enabled(field) && !offered.is_empty() && selected.is_empty() {
            let message = validation_message(input.settings, input.language, field);
            return InterceptDecision::block(field, message);
        }
    }

    InterceptDecision::allow()
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
