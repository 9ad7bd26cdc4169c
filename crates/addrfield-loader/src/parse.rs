//! Lenient decoding of the dataset body.

use addrfield_core::LocationRecord;

use crate::error::LoaderError;

/// Decodes a JSON array of location records.
///
/// The top level must be an array. Entries that do not decode as an object
/// are skipped rather than failing the whole file.
///
/// # Errors
///
/// Returns [`LoaderError::Deserialize`] if `body` is not a JSON array.
pub fn parse_records(body: &str, context: &str) -> Result<Vec<LocationRecord>, LoaderError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| LoaderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;

    let total = entries.len();
    let records: Vec<LocationRecord> = entries
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|v| serde_json::from_value::<LocationRecord>(v).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(
            context,
            skipped = total - records.len(),
            "skipped non-object dataset entries"
        );
    }

    Ok(records)
}
