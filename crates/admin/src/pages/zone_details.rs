//! State behind the zone details page.

use harbor_core::{Country, ShippingMethodId};

use super::WarehouseSearch;
use crate::components::Choice;
use crate::forms::{FieldErrors, ZoneEditForm};
use crate::saleor::{WarehouseRef, ZoneRecord, ZoneSummary};

/// The authoritative zone plus everything the page layers on top of it.
///
/// Mutation outcomes are applied by replacing substructures of the zone; the
/// edit form is seeded once at mount and only re-syncs its warehouse display
/// value when the zone is replaced.
#[derive(Debug, Clone)]
pub struct ZoneDetailsPage {
    zone: ZoneRecord,
    form: ZoneEditForm,
    warehouses: WarehouseSearch,
    errors: FieldErrors,
    notice: Option<String>,
}

impl ZoneDetailsPage {
    /// Mount the page for a freshly fetched zone.
    #[must_use]
    pub fn mount(zone: ZoneRecord) -> Self {
        let mut warehouses = WarehouseSearch::new();
        if let Some(warehouse) = zone.primary_warehouse() {
            warehouses.insert_first(warehouse.clone());
        }

        Self {
            form: ZoneEditForm::new(Some(&zone)),
            zone,
            warehouses,
            errors: FieldErrors::new(),
            notice: None,
        }
    }

    #[must_use]
    pub const fn zone(&self) -> &ZoneRecord {
        &self.zone
    }

    #[must_use]
    pub const fn form(&self) -> &ZoneEditForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut ZoneEditForm {
        &mut self.form
    }

    #[must_use]
    pub const fn warehouse_search(&self) -> &WarehouseSearch {
        &self.warehouses
    }

    pub const fn warehouse_search_mut(&mut self) -> &mut WarehouseSearch {
        &mut self.warehouses
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replace the field errors with the ones from the latest response.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Show a page-level notice (transport failures, not field errors).
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Loaded warehouses as choices for the warehouse field.
    #[must_use]
    pub fn warehouse_choices(&self) -> Vec<Choice> {
        self.warehouses.choices()
    }

    /// Pick a warehouse from the loaded choices.
    pub fn change_warehouse(&mut self, value: impl Into<String>) {
        let choices = self.warehouses.choices();
        self.form.change_warehouse(value, &choices);
    }

    /// A warehouse was created for this zone: offer it and select it.
    pub fn add_warehouse(&mut self, warehouse: WarehouseRef) {
        let value = warehouse.id.to_string();
        self.warehouses.insert_first(warehouse);
        self.change_warehouse(value);
    }

    // =========================================================================
    // Mutation outcomes
    // =========================================================================

    /// Zone create/update result: merge name, default flag and countries.
    pub fn apply_zone_summary(&mut self, summary: ZoneSummary) {
        self.zone.merge_summary(summary);
        self.form.sync_zone(&self.zone);
    }

    /// Rate create/update result: the whole zone is replaced.
    pub fn replace_zone(&mut self, zone: ZoneRecord) {
        self.zone = zone;
        self.form.sync_zone(&self.zone);
    }

    /// Rate delete succeeded: drop the rates from the zone.
    pub fn remove_rates(&mut self, ids: &[ShippingMethodId]) {
        self.zone
            .shipping_methods
            .retain(|rate| !ids.contains(&rate.id));
    }

    /// Country assignment changed.
    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.zone.countries = countries;
    }

    /// Warehouse assignment was saved: the previous first warehouse was
    /// unassigned and `warehouse`, if any, assigned in its place.
    pub fn set_warehouse(&mut self, warehouse: Option<WarehouseRef>) {
        if !self.zone.warehouses.is_empty() {
            self.zone.warehouses.remove(0);
        }
        if let Some(warehouse) = warehouse {
            self.zone.warehouses.retain(|w| w.id != warehouse.id);
            self.zone.warehouses.insert(0, warehouse);
        }
        self.form.sync_zone(&self.zone);
    }
}
