use serde_json::json;

use super::*;

const URL: &str = "https://cdn.example.com/addresses.json";

fn settings() -> Settings {
    Settings::from_json(&json!({
        "city_field": "Yes",
        "district_field": "Yes",
        "subdistrict_field": "Yes",
        "addresses_file_url": URL,
        "country_code": "ID"
    }))
}

fn snapshot(settings: Settings) -> HostSnapshot {
    HostSnapshot {
        address: ShippingAddress::new("ID", "JB"),
        language: Language::new("en"),
        can_block_progress: true,
        settings,
    }
}

fn records() -> Vec<LocationRecord> {
    vec![
        LocationRecord::new("ID", "JB", "Bandung", "Coblong", "Dago"),
        LocationRecord::new("ID", "JB", "Bandung", "Sukajadi", "Pasteur"),
        LocationRecord::new("ID", "JK", "Jakarta Selatan", "Setiabudi", "Kuningan"),
        LocationRecord::new("MY", "JB", "Johor Bahru", "Tebrau", "Larkin"),
    ]
}

fn fetches(effects: &[Effect]) -> Vec<&FetchRequest> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Fetch(r) => Some(r),
            Effect::Persist(_) => None,
        })
        .collect()
}

fn persisted(effects: &[Effect]) -> Vec<(String, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Persist(r) => Some((r.change.key.clone(), r.change.value.clone())),
            Effect::Fetch(_) => None,
        })
        .collect()
}

/// Mounted widget with the dataset already loaded.
fn loaded_widget(settings: Settings) -> AddressWidget {
    let (mut widget, effects) = AddressWidget::mount(snapshot(settings));
    let generation = fetches(&effects)[0].generation;
    widget.complete_fetch(generation, Ok(records()));
    widget
}

#[test]
fn mount_requests_fetch_and_shows_loading() {
    let (widget, effects) = AddressWidget::mount(snapshot(settings()));
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, URL);
    assert_eq!(requests[0].country_code, "ID");
    assert!(widget.is_loading());
    assert!(matches!(
        widget.view(),
        WidgetView::Loading { placeholders: 3, .. }
    ));
}

#[test]
fn mount_without_url_or_country_does_not_fetch() {
    let (widget, effects) = AddressWidget::mount(snapshot(Settings::from_json(&json!({
        "country_code": "ID"
    }))));
    assert!(effects.is_empty());
    assert!(!widget.is_loading());

    let mut host = snapshot(settings());
    host.address.country_code = Some(String::new());
    let (_, effects) = AddressWidget::mount(host);
    assert!(fetches(&effects).is_empty());
}

#[test]
fn loaded_dataset_is_filtered_to_buyer_country() {
    let widget = loaded_widget(settings());
    assert!(!widget.is_loading());
    assert_eq!(widget.dataset().len(), 3);
    assert_eq!(widget.options().cities, vec!["Bandung".to_owned()]);
}

#[test]
fn failed_fetch_leaves_empty_dataset() {
    let (mut widget, effects) = AddressWidget::mount(snapshot(settings()));
    let generation = fetches(&effects)[0].generation;
    widget.complete_fetch(
        generation,
        Err(LoaderError::UnexpectedStatus {
            status: 500,
            url: URL.to_owned(),
        }),
    );
    assert!(!widget.is_loading());
    assert!(widget.dataset().is_empty());
    assert!(widget.options().cities.is_empty());
    assert!(matches!(widget.view(), WidgetView::Ready { .. }));
}

#[test]
fn stale_fetch_response_is_dropped() {
    let (mut widget, effects) = AddressWidget::mount(snapshot(settings()));
    let first = fetches(&effects)[0].generation;

    let effects = widget.handle(WidgetEvent::SettingsChanged(Settings::from_json(&json!({
        "city_field": "Yes",
        "addresses_file_url": "https://cdn.example.com/v2.json",
        "country_code": "ID"
    }))));
    let second = fetches(&effects)[0].generation;
    assert!(second > first);

    widget.complete_fetch(
        second,
        Ok(vec![LocationRecord::new(
            "ID",
            "JB",
            "Cimahi",
            "Cimahi Utara",
            "Citeureup",
        )]),
    );
    widget.complete_fetch(first, Ok(records()));

    assert_eq!(widget.options().cities, vec!["Cimahi".to_owned()]);
    assert!(!widget.is_loading());
}

#[test]
fn removing_source_url_abandons_in_flight_fetch() {
    let (mut widget, effects) = AddressWidget::mount(snapshot(settings()));
    let generation = fetches(&effects)[0].generation;

    let effects = widget.handle(WidgetEvent::SettingsChanged(Settings::from_json(&json!({
        "city_field": "Yes",
        "country_code": "ID"
    }))));
    assert!(fetches(&effects).is_empty());
    assert!(!widget.is_loading());

    widget.complete_fetch(generation, Ok(records()));
    assert!(widget.dataset().is_empty());
    assert!(widget.options().cities.is_empty());
}

#[test]
fn unrelated_settings_push_does_not_refetch_or_reset() {
    let mut widget = loaded_widget(settings());
    widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));

    let mut relabelled = settings();
    relabelled.city.label_eng = Some("Town".to_owned());
    let effects = widget.handle(WidgetEvent::SettingsChanged(relabelled));

    assert!(fetches(&effects).is_empty());
    assert_eq!(widget.selection().city, "Bandung");
}

#[test]
fn region_change_resets_selections() {
    let mut widget = loaded_widget(settings());
    widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    widget.handle(WidgetEvent::DistrictSelected("Coblong".to_owned()));

    let effects = widget.handle(WidgetEvent::AddressChanged(ShippingAddress::new("ID", "JK")));
    assert!(fetches(&effects).is_empty());
    assert_eq!(widget.selection(), &SelectionState::default());
    assert_eq!(widget.options().cities, vec!["Jakarta Selatan".to_owned()]);
    assert!(widget.options().districts.is_empty());
}

#[test]
fn country_change_refetches() {
    let mut widget = loaded_widget(settings());
    let effects = widget.handle(WidgetEvent::AddressChanged(ShippingAddress::new("MY", "JB")));
    let requests = fetches(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].country_code, "MY");
    assert!(widget.is_loading());
}

#[test]
fn selections_persist_under_configured_keys() {
    let mut custom = settings();
    custom.city.attribute_key = Some("shipping_city".to_owned());
    let mut widget = loaded_widget(custom);

    let effects = widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    assert_eq!(
        persisted(&effects),
        vec![("shipping_city".to_owned(), "Bandung".to_owned())]
    );

    let effects = widget.handle(WidgetEvent::DistrictSelected("Coblong".to_owned()));
    assert_eq!(
        persisted(&effects),
        vec![("District".to_owned(), "Coblong".to_owned())]
    );

    let effects = widget.handle(WidgetEvent::SubdistrictSelected("Dago".to_owned()));
    assert_eq!(
        persisted(&effects),
        vec![("Subdistrict".to_owned(), "Dago".to_owned())]
    );
}

#[test]
fn clearing_children_does_not_persist() {
    let mut widget = loaded_widget(settings());
    widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    widget.handle(WidgetEvent::DistrictSelected("Coblong".to_owned()));

    // Reselecting the city clears the district; nothing is written for it.
    let effects = widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    assert!(persisted(&effects).is_empty());
    assert_eq!(widget.selection().district, "");
}

#[test]
fn intercept_blocks_in_order_and_sets_error_on_confirm() {
    let mut widget = loaded_widget(settings());

    let decision = widget.intercept(true);
    assert_eq!(decision.behavior(), Behavior::Block);
    assert_eq!(decision.reason(), Some("City is required"));
    widget.complete_intercept(&decision, Behavior::Block);
    assert_eq!(widget.errors().get(Field::City), Some("City is required"));

    widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    assert!(widget.errors().get(Field::City).is_none());

    let decision = widget.intercept(true);
    assert_eq!(decision.blocked_field(), Some(Field::District));
}

#[test]
fn intercept_allow_clears_errors() {
    let mut widget = loaded_widget(settings());
    let decision = widget.intercept(true);
    widget.complete_intercept(&decision, Behavior::Block);

    widget.handle(WidgetEvent::CitySelected("Bandung".to_owned()));
    widget.handle(WidgetEvent::DistrictSelected("Coblong".to_owned()));
    widget.handle(WidgetEvent::SubdistrictSelected("Dago".to_owned()));

    let decision = widget.intercept(true);
    assert_eq!(decision.behavior(), Behavior::Allow);
    widget.complete_intercept(&decision, Behavior::Allow);
    assert!(widget.errors().is_empty());
}

#[test]
fn intercept_without_capability_never_blocks_but_fields_stay_required() {
    let mut host = snapshot(settings());
    host.can_block_progress = true;
    let (mut widget, effects) = AddressWidget::mount(host);
    widget.complete_fetch(fetches(&effects)[0].generation, Ok(records()));

    assert_eq!(widget.intercept(false).behavior(), Behavior::Allow);
    let WidgetView::Ready { fields, .. } = widget.view() else {
        panic!("expected ready view");
    };
    assert!(fields.iter().all(|f| f.required));
}

#[test]
fn country_mismatch_hides_widget_and_never_blocks() {
    let mut widget = loaded_widget(settings());
    widget.handle(WidgetEvent::SettingsChanged(Settings::from_json(&json!({
        "city_field": "Yes",
        "addresses_file_url": URL,
        "country_code": "MY"
    }))));

    assert_eq!(widget.view(), WidgetView::Hidden);
    let decision = widget.intercept(true);
    assert_eq!(decision.behavior(), Behavior::Allow);
    widget.complete_intercept(&decision, Behavior::Allow);
    assert!(widget.errors().is_empty());
}

#[test]
fn disabled_city_flow_keys_subdistricts_on_region() {
    let settings = Settings::from_json(&json!({
        "city_field": "No",
        "district_field": "Yes",
        "subdistrict_field": "Yes",
        "addresses_file_url": URL,
        "country_code": "ID"
    }));
    let mut widget = loaded_widget(settings);
    assert!(widget.options().cities.is_empty());
    assert_eq!(
        widget.options().districts,
        vec!["Coblong".to_owned(), "Sukajadi".to_owned()]
    );

    widget.handle(WidgetEvent::DistrictSelected("Sukajadi".to_owned()));
    assert_eq!(widget.options().subdistricts, vec!["Pasteur".to_owned()]);

    let WidgetView::Ready { columns, fields } = widget.view() else {
        panic!("expected ready view");
    };
    assert_eq!(columns, &["1fr 1fr"]);
    assert_eq!(fields[0].field, Field::District);
    assert_eq!(fields[0].label, "District");
    assert_eq!(fields[1].label, "Select Subdistrict");
}

#[test]
fn language_change_relabels_fields() {
    let mut widget = loaded_widget(settings());
    widget.handle(WidgetEvent::LanguageChanged(Language::new("id")));
    let WidgetView::Ready { fields, .. } = widget.view() else {
        panic!("expected ready view");
    };
    let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Kota", "Kelurahan", "Kecamatan"]);
}
