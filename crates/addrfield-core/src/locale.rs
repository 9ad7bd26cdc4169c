//! Buyer language detection and localized validation messages.
//!
//! The widget only knows two registers: English, and the store's local
//! language (Indonesian fallbacks ship built in; merchants override them
//! through the `_translated` settings).

use crate::settings::{Field, Settings};

/// Resolved buyer language as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Language {
    iso_code: Option<String>,
}

impl Language {
    #[must_use]
    pub fn new(iso_code: &str) -> Self {
        Self {
            iso_code: Some(iso_code.to_owned()),
        }
    }

    /// Language the host could not resolve. Treated as non-English.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn iso_code(&self) -> Option<&str> {
        self.iso_code.as_deref()
    }

    /// `true` for plain `en`, or `en-` followed by the store country code.
    #[must_use]
    pub fn is_english(&self, settings: &Settings) -> bool {
        let Some(code) = self.iso_code.as_deref() else {
            return false;
        };
        if code == "en" {
            return true;
        }
        match (code.strip_prefix("en-"), settings.country_code.as_deref()) {
            (Some(region), Some(store)) => region == store,
            _ => false,
        }
    }
}

fn default_message_en(field: Field) -> &'static str {
    match field {
        Field::City => "City is required",
        Field::District => "District is required",
        Field::Subdistrict => "Subdistrict is required",
    }
}

fn default_message_local(field: Field) -> &'static str {
    match field {
        Field::City => "Kota Diperlukan",
        Field::District => "Kelurahan Diperlukan",
        Field::Subdistrict => "Kecamatan Diperlukan",
    }
}

/// Host-facing block reason. Always English.
#[must_use]
pub fn block_reason(field: Field) -> &'static str {
    default_message_en(field)
}

/// Inline error text for an unfilled required field.
///
/// A configured override wins even when it is an empty string.
#[must_use]
pub fn validation_message(settings: &Settings, language: &Language, field: Field) -> String {
    let field_settings = settings.field(field);
    if language.is_english(settings) {
        field_settings
            .message_eng
            .clone()
            .unwrap_or_else(|| default_message_en(field).to_owned())
    } else {
        field_settings
            .message_translated
            .clone()
            .unwrap_or_else(|| default_message_local(field).to_owned())
    }
}
