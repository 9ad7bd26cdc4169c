//! Address dataset rows and the per-country dataset the widget works on.
//!
//! ## Observed shape of the source file
//!
//! The merchant hosts a single JSON array, one object per subdistrict:
//!
//! ```json
//! [{"country_id": "ID", "region_code": "JK", "city": "Jakarta Selatan",
//!   "district": "Kebayoran Baru", "subdistrict": "Senayan"}]
//! ```
//!
//! Files are hand-maintained spreadsheet exports, so fields go missing, show
//! up as `null`, or carry numeric codes. Every field is modelled as
//! `Option<String>` and anything that is not a JSON string is treated as
//! absent. An absent value never matches a filter key and is never offered
//! as an option.

use serde::{Deserialize, Deserializer};

/// One row of the address dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub country_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subdistrict: Option<String>,
}

impl LocationRecord {
    /// Builds a fully populated record.
    #[must_use]
    pub fn new(
        country_id: &str,
        region_code: &str,
        city: &str,
        district: &str,
        subdistrict: &str,
    ) -> Self {
        Self {
            country_id: Some(country_id.to_owned()),
            region_code: Some(region_code.to_owned()),
            city: Some(city.to_owned()),
            district: Some(district.to_owned()),
            subdistrict: Some(subdistrict.to_owned()),
        }
    }

    pub(crate) fn in_region(&self, region: Option<&str>) -> bool {
        matches_key(self.region_code.as_deref(), region)
    }

    pub(crate) fn in_city(&self, city: &str) -> bool {
        self.city.as_deref() == Some(city)
    }

    pub(crate) fn in_district(&self, district: &str) -> bool {
        self.district.as_deref() == Some(district)
    }
}

/// Absent keys on either side never match.
fn matches_key(value: Option<&str>, key: Option<&str>) -> bool {
    match (value, key) {
        (Some(v), Some(k)) => v == k,
        _ => false,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// The buyer-country slice of the address file.
///
/// Replaced wholesale on every refetch; `version` identifies the
/// replacement so dependent derivations can tell a new dataset from a
/// repeated host push.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    version: u64,
    records: Vec<LocationRecord>,
}

impl Dataset {
    /// An empty dataset at version 0, used before the first fetch completes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps only the records whose `country_id` equals `country_code`.
    #[must_use]
    pub fn for_country(version: u64, records: Vec<LocationRecord>, country_code: &str) -> Self {
        let records = records
            .into_iter()
            .filter(|r| r.country_id.as_deref() == Some(country_code))
            .collect();
        Self { version, records }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
