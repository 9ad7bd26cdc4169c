//! Cascading city → district → subdistrict selection.
//!
//! Option lists are always derived from the dataset, never edited directly.
//! Changing a level clears every level below it, selection and options,
//! before the child list is derived again.

use std::collections::HashSet;

use crate::record::{Dataset, LocationRecord};
use crate::settings::FieldToggle;

/// Current picks. An empty string means "unselected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub city: String,
    pub district: String,
    pub subdistrict: String,
}

/// Options offered at each level, unique and in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionLists {
    pub cities: Vec<String>,
    pub districts: Vec<String>,
    pub subdistricts: Vec<String>,
}

/// Upstream inputs the top-level derivation depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeriveKey {
    dataset_version: u64,
    region: Option<String>,
    city_toggle: FieldToggle,
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyFilter {
    selection: SelectionState,
    options: OptionLists,
    derived_for: Option<DeriveKey>,
}

impl HierarchyFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    /// Re-derives the top level if the dataset version, region, or city
    /// toggle differ from the last derivation. Returns whether it ran.
    pub fn sync_upstream(
        &mut self,
        dataset: &Dataset,
        region: Option<&str>,
        city_toggle: FieldToggle,
    ) -> bool {
        let key = DeriveKey {
            dataset_version: dataset.version(),
            region: region.map(str::to_owned),
            city_toggle,
        };
        if self.derived_for.as_ref() == Some(&key) {
            return false;
        }
        self.derived_for = Some(key);
        self.reset(dataset, region, city_toggle);
        true
    }

    /// Clears every selection and list, then derives the top level for the
    /// region: districts directly when the city level is switched off,
    /// cities otherwise.
    pub fn reset(&mut self, dataset: &Dataset, region: Option<&str>, city_toggle: FieldToggle) {
        self.selection = SelectionState::default();
        self.options = OptionLists::default();

        let in_region = dataset.records().iter().filter(|r| r.in_region(region));
        if city_toggle.is_disabled() {
            self.options.districts = unique_in_order(in_region.map(|r| r.district.as_deref()));
        } else {
            self.options.cities = unique_in_order(in_region.map(|r| r.city.as_deref()));
        }

        tracing::debug!(
            region = region.unwrap_or_default(),
            cities = self.options.cities.len(),
            districts = self.options.districts.len(),
            "derived top-level address options"
        );
    }

    /// Districts come from every record in the chosen city; the region is
    /// not consulted at this level.
    pub fn select_city(&mut self, dataset: &Dataset, value: &str) {
        self.selection.city = value.to_owned();
        self.selection.district.clear();
        self.selection.subdistrict.clear();
        self.options.subdistricts.clear();

        self.options.districts = unique_in_order(
            dataset
                .records()
                .iter()
                .filter(|r| r.in_city(value))
                .map(|r| r.district.as_deref()),
        );
    }

    /// With the city level switched off, subdistricts are keyed on
    /// (region, district); otherwise on (selected city, district).
    pub fn select_district(
        &mut self,
        dataset: &Dataset,
        region: Option<&str>,
        city_toggle: FieldToggle,
        value: &str,
    ) {
        self.selection.district = value.to_owned();
        self.selection.subdistrict.clear();

        let city = self.selection.city.as_str();
        let parent = |r: &LocationRecord| {
            if city_toggle.is_disabled() {
                r.in_region(region)
            } else {
                r.in_city(city)
            }
        };

        self.options.subdistricts = unique_in_order(
            dataset
                .records()
                .iter()
                .filter(|r| parent(r) && r.in_district(value))
                .map(|r| r.subdistrict.as_deref()),
        );
    }

    pub fn select_subdistrict(&mut self, value: &str) {
        self.selection.subdistrict = value.to_owned();
    }
}

/// First occurrence wins; absent values are dropped.
fn unique_in_order<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "hierarchy_test.rs"]
mod tests;
