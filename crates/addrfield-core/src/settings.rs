//! Merchant settings snapshot pushed by the host checkout.
//!
//! The host hands over a loosely typed JSON object. Every key is optional:
//! absent keys and values of the wrong type fall back to the documented
//! defaults instead of failing.

use serde_json::{Map, Value};

/// One level of the address hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    City,
    District,
    Subdistrict,
}

impl Field {
    /// Fields in hierarchy order, parent first.
    pub const ALL: [Field; 3] = [Field::City, Field::District, Field::Subdistrict];

    /// Name used inside settings keys (`label_{name}_ENG` and friends).
    #[must_use]
    pub fn settings_name(self) -> &'static str {
        match self {
            Field::City => "city",
            Field::District => "district",
            Field::Subdistrict => "subdistrict",
        }
    }

    /// English label used when no override is configured.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Field::City => "City",
            Field::District => "District",
            Field::Subdistrict => "Subdistrict",
        }
    }

    /// Attribute key used when `target_save_note_key_for_{name}` is unset.
    #[must_use]
    pub fn default_attribute_key(self) -> &'static str {
        self.default_label()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Field::City => 0,
            Field::District => 1,
            Field::Subdistrict => 2,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.settings_name())
    }
}

/// Merchant toggle for one hierarchy level.
///
/// Rendering and validation require an explicit `Yes`; the filter only
/// treats the city level as skipped on an explicit `No`. An unset city
/// toggle therefore hides the field but still derives the city list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldToggle {
    Yes,
    No,
    #[default]
    Unset,
}

impl FieldToggle {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Yes") => FieldToggle::Yes,
            Some("No") => FieldToggle::No,
            _ => FieldToggle::Unset,
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self == FieldToggle::Yes
    }

    #[must_use]
    pub fn is_disabled(self) -> bool {
        self == FieldToggle::No
    }
}

/// Per-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSettings {
    pub toggle: FieldToggle,
    pub label_eng: Option<String>,
    pub label_translated: Option<String>,
    pub message_eng: Option<String>,
    pub message_translated: Option<String>,
    pub attribute_key: Option<String>,
}

/// Which levels are rendered and required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldConfig {
    pub city: bool,
    pub district: bool,
    pub subdistrict: bool,
}

impl FieldConfig {
    #[must_use]
    pub fn is_enabled(&self, field: Field) -> bool {
        match field {
            Field::City => self.city,
            Field::District => self.district,
            Field::Subdistrict => self.subdistrict,
        }
    }

    #[must_use]
    pub fn enabled_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.is_enabled(**f)).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub addresses_file_url: Option<String>,
    /// Store target country; the widget stays hidden for other countries.
    pub country_code: Option<String>,
    pub city: FieldSettings,
    pub district: FieldSettings,
    pub subdistrict: FieldSettings,
}

impl Settings {
    /// Parses a host settings snapshot. Anything other than a JSON object
    /// yields the defaults.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            tracing::debug!("settings snapshot is not an object; using defaults");
            return Self::default();
        };

        Self {
            addresses_file_url: setting_string(map, "addresses_file_url"),
            country_code: setting_string(map, "country_code"),
            city: parse_field(map, Field::City),
            district: parse_field(map, Field::District),
            subdistrict: parse_field(map, Field::Subdistrict),
        }
    }

    #[must_use]
    pub fn field(&self, field: Field) -> &FieldSettings {
        match field {
            Field::City => &self.city,
            Field::District => &self.district,
            Field::Subdistrict => &self.subdistrict,
        }
    }

    #[must_use]
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            city: self.city.toggle.is_enabled(),
            district: self.district.toggle.is_enabled(),
            subdistrict: self.subdistrict.toggle.is_enabled(),
        }
    }

    /// Order attribute key for `field`. Empty overrides fall back to the default.
    #[must_use]
    pub fn attribute_key(&self, field: Field) -> String {
        self.field(field)
            .attribute_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(field.default_attribute_key())
            .to_owned()
    }

    /// Source URL, if configured and non-empty.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.addresses_file_url.as_deref().filter(|u| !u.is_empty())
    }
}

fn parse_field(map: &Map<String, Value>, field: Field) -> FieldSettings {
    let name = field.settings_name();
    FieldSettings {
        toggle: FieldToggle::parse(setting_string(map, &format!("{name}_field")).as_deref()),
        label_eng: setting_string(map, &format!("label_{name}_ENG")),
        label_translated: setting_string(map, &format!("label_{name}_translated")),
        message_eng: setting_string(map, &format!("validation_message_{name}_ENG")),
        message_translated: setting_string(map, &format!("validation_message_{name}_translated")),
        attribute_key: setting_string(map, &format!("target_save_note_key_for_{name}")),
    }
}

/// Strings pass through; numbers and booleans are stringified.
fn setting_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
