//! Maps widget state to what the host renders.

use crate::gate::ValidationErrors;
use crate::hierarchy::{OptionLists, SelectionState};
use crate::locale::Language;
use crate::settings::{Field, Settings};

/// Skeleton cells shown while the dataset loads.
pub const LOADING_PLACEHOLDERS: usize = 3;

const ONE_COLUMN: &[&str] = &["1fr"];
const TWO_COLUMNS: &[&str] = &["1fr 1fr"];
const THREE_COLUMNS: &[&str] = &["1fr 1fr 1fr"];

/// Grid template for `enabled` visible fields; one column for anything
/// outside 1..=3.
#[must_use]
pub fn grid_columns(enabled: usize) -> &'static [&'static str] {
    match enabled {
        2 => TWO_COLUMNS,
        3 => THREE_COLUMNS,
        _ => ONE_COLUMN,
    }
}

fn local_label(field: Field) -> &'static str {
    match field {
        Field::City => "Kota",
        Field::District => "Kelurahan",
        Field::Subdistrict => "Kecamatan",
    }
}

/// Select label for `field`.
///
/// English prompts with "Select …" until a value is picked. The local
/// register always shows the plain translated label.
#[must_use]
pub fn field_label(
    settings: &Settings,
    language: &Language,
    field: Field,
    selected: &str,
) -> String {
    let field_settings = settings.field(field);
    if language.is_english(settings) {
        let label = field_settings
            .label_eng
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(field.default_label());
        if selected.is_empty() {
            format!("Select {label}")
        } else {
            label.to_owned()
        }
    } else {
        field_settings
            .label_translated
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(local_label(field))
            .to_owned()
    }
}

/// The widget only shows for buyers in the store's target country.
#[must_use]
pub fn is_visible(settings: &Settings, buyer_country: Option<&str>) -> bool {
    settings.country_code.as_deref() == buyer_country
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: String,
    pub value: String,
    pub options: Vec<String>,
    pub required: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    /// Buyer country differs from the store's target country.
    Hidden,
    Loading {
        columns: &'static [&'static str],
        placeholders: usize,
    },
    Ready {
        columns: &'static [&'static str],
        fields: Vec<FieldView>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct ViewInput<'a> {
    pub settings: &'a Settings,
    pub language: &'a Language,
    pub buyer_country: Option<&'a str>,
    pub loading: bool,
    pub can_block_progress: bool,
    pub selection: &'a SelectionState,
    pub options: &'a OptionLists,
    pub errors: &'a ValidationErrors,
}

#[must_use]
pub fn render(input: &ViewInput<'_>) -> WidgetView {
    if !is_visible(input.settings, input.buyer_country) {
        return WidgetView::Hidden;
    }

    let config = input.settings.field_config();
    let columns = grid_columns(config.enabled_count());

    if input.loading {
        return WidgetView::Loading {
            columns,
            placeholders: LOADING_PLACEHOLDERS,
        };
    }

    let fields = Field::ALL
        .into_iter()
        .filter(|f| config.is_enabled(*f))
        .map(|field| {
            let (value, options) = match field {
                Field::City => (&input.selection.city, &input.options.cities),
                Field::District => (&input.selection.district, &input.options.districts),
                Field::Subdistrict => (&input.selection.subdistrict, &input.options.subdistricts),
            };
            FieldView {
                field,
                label: field_label(input.settings, input.language, field, value),
                value: value.clone(),
                options: options.clone(),
                required: input.can_block_progress,
                error: input.errors.get(field).map(str::to_owned),
            }
        })
        .collect();

    WidgetView::Ready { columns, fields }
}
