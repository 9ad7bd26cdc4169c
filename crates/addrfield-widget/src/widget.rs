//! The widget state machine.
//!
//! Every entry point applies its input, then runs the same reaction pass:
//! request a fetch if the (URL, country) pair changed, re-derive the top
//! level if the dataset, region, or city toggle changed, and queue an
//! attribute write for every selection that changed to a non-empty value.

use addrfield_core::gate::{self, GateInput};
use addrfield_core::layout::{self, ViewInput};
use addrfield_core::{
    AttributeSync, Behavior, Dataset, Field, HierarchyFilter, InterceptDecision, Language,
    LocationRecord, OptionLists, PersistRequest, SelectionState, Settings, ValidationErrors,
    WidgetView,
};
use addrfield_loader::LoaderError;

use crate::host::{HostSnapshot, ShippingAddress};

/// Host pushes and buyer interactions.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    SettingsChanged(Settings),
    AddressChanged(ShippingAddress),
    LanguageChanged(Language),
    CapabilityChanged(bool),
    CitySelected(String),
    DistrictSelected(String),
    SubdistrictSelected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub url: String,
    pub country_code: String,
}

/// Work the widget wants done outside the reducer.
#[derive(Debug, Clone)]
pub enum Effect {
    Fetch(FetchRequest),
    Persist(PersistRequest),
}

#[derive(Debug)]
pub struct AddressWidget {
    settings: Settings,
    address: ShippingAddress,
    language: Language,
    can_block_progress: bool,
    dataset: Dataset,
    loading: bool,
    fetch_generation: u64,
    /// (url, country) the current dataset was requested for; cleared when
    /// either input goes missing so restoring it fetches again.
    requested: Option<(String, String)>,
    /// Latest issued request, until its response arrives.
    in_flight: Option<FetchRequest>,
    hierarchy: HierarchyFilter,
    errors: ValidationErrors,
    sync: AttributeSync,
}

impl AddressWidget {
    #[must_use]
    pub fn mount(snapshot: HostSnapshot) -> (Self, Vec<Effect>) {
        let mut widget = Self {
            settings: snapshot.settings,
            address: snapshot.address,
            language: snapshot.language,
            can_block_progress: snapshot.can_block_progress,
            dataset: Dataset::empty(),
            loading: false,
            fetch_generation: 0,
            requested: None,
            in_flight: None,
            hierarchy: HierarchyFilter::new(),
            errors: ValidationErrors::default(),
            sync: AttributeSync::new(),
        };
        let mut effects = Vec::new();
        widget.react(&mut effects);
        (widget, effects)
    }

    pub fn handle(&mut self, event: WidgetEvent) -> Vec<Effect> {
        match event {
            WidgetEvent::SettingsChanged(settings) => self.settings = settings,
            WidgetEvent::AddressChanged(address) => self.address = address,
            WidgetEvent::LanguageChanged(language) => self.language = language,
            WidgetEvent::CapabilityChanged(granted) => self.can_block_progress = granted,
            WidgetEvent::CitySelected(value) => {
                self.errors.clear(Field::City);
                self.hierarchy.select_city(&self.dataset, &value);
            }
            WidgetEvent::DistrictSelected(value) => {
                self.errors.clear(Field::District);
                self.hierarchy.select_district(
                    &self.dataset,
                    self.address.province_code.as_deref(),
                    self.settings.city.toggle,
                    &value,
                );
            }
            WidgetEvent::SubdistrictSelected(value) => {
                self.errors.clear(Field::Subdistrict);
                self.hierarchy.select_subdistrict(&value);
            }
        }

        let mut effects = Vec::new();
        self.react(&mut effects);
        effects
    }

    /// Applies a finished fetch. Completions for anything but the latest
    /// request are dropped. A failed fetch leaves an empty dataset.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<LocationRecord>, LoaderError>,
    ) -> Vec<Effect> {
        let Some(request) = self.in_flight.take_if(|r| r.generation == generation) else {
            tracing::debug!(
                generation,
                latest = self.fetch_generation,
                "dropping stale dataset response"
            );
            return Vec::new();
        };

        self.loading = false;
        let FetchRequest {
            url,
            country_code: country,
            ..
        } = request;
        match result {
            Ok(records) => {
                self.dataset = Dataset::for_country(generation, records, &country);
                tracing::info!(
                    url = %url,
                    country = %country,
                    generation,
                    records = self.dataset.len(),
                    "address dataset loaded"
                );
            }
            Err(e) => {
                tracing::error!(
                    url = %url,
                    country = %country,
                    error = %e,
                    "failed to fetch address dataset"
                );
                self.dataset = Dataset::for_country(generation, Vec::new(), &country);
            }
        }

        let mut effects = Vec::new();
        self.react(&mut effects);
        effects
    }

    /// Decides whether checkout may proceed. Pure; apply the outcome with
    /// [`AddressWidget::complete_intercept`].
    #[must_use]
    pub fn intercept(&self, can_block_progress: bool) -> InterceptDecision {
        if !self.is_visible() {
            return InterceptDecision::allow();
        }
        gate::evaluate(&GateInput {
            settings: &self.settings,
            language: &self.language,
            options: self.hierarchy.options(),
            selection: self.hierarchy.selection(),
            can_block_progress,
        })
    }

    pub fn complete_intercept(&mut self, decision: &InterceptDecision, result: Behavior) {
        decision.perform(result, &mut self.errors);
    }

    #[must_use]
    pub fn view(&self) -> WidgetView {
        layout::render(&ViewInput {
            settings: &self.settings,
            language: &self.language,
            buyer_country: self.address.country_code.as_deref(),
            loading: self.loading,
            can_block_progress: self.can_block_progress,
            selection: self.hierarchy.selection(),
            options: self.hierarchy.options(),
            errors: &self.errors,
        })
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.hierarchy.selection()
    }

    #[must_use]
    pub fn options(&self) -> &OptionLists {
        self.hierarchy.options()
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn is_visible(&self) -> bool {
        layout::is_visible(&self.settings, self.address.country_code.as_deref())
    }

    fn react(&mut self, effects: &mut Vec<Effect>) {
        if let Some(request) = self.next_fetch() {
            effects.push(Effect::Fetch(request));
        }

        self.hierarchy.sync_upstream(
            &self.dataset,
            self.address.province_code.as_deref(),
            self.settings.city.toggle,
        );

        for field in Field::ALL {
            let key = self.settings.attribute_key(field);
            let selection = self.hierarchy.selection();
            let value = match field {
                Field::City => &selection.city,
                Field::District => &selection.district,
                Field::Subdistrict => &selection.subdistrict,
            };
            if let Some(request) = self.sync.observe(field, &key, value) {
                effects.push(Effect::Persist(request));
            }
        }
    }

    fn next_fetch(&mut self) -> Option<FetchRequest> {
        let url = self.settings.source_url().map(str::to_owned);
        let country = self
            .address
            .country_code
            .clone()
            .filter(|c| !c.is_empty());

        let (Some(url), Some(country)) = (url, country) else {
            // Any response still outstanding belongs to a source that is no
            // longer configured.
            self.requested = None;
            self.in_flight = None;
            self.loading = false;
            return None;
        };

        let key = (url, country);
        if self.requested.as_ref() == Some(&key) {
            return None;
        }

        self.fetch_generation += 1;
        self.loading = true;
        self.requested = Some(key.clone());
        let (url, country_code) = key;
        let request = FetchRequest {
            generation: self.fetch_generation,
            url,
            country_code,
        };
        self.in_flight = Some(request.clone());
        Some(request)
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
