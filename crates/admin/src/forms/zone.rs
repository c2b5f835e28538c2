//! Edit form for a shipping zone's name and warehouse.

use std::fmt;
use std::str::FromStr;

use harbor_core::WarehouseId;

use super::state::{FormData, FormState};
use crate::components::choice_list::{Choice, display_label};
use crate::saleor::ZoneRecord;

/// Editable zone fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFormData {
    pub name: String,
    /// Raw warehouse id; empty when the zone has none.
    pub warehouse: String,
}

impl ZoneFormData {
    /// Seed from the zone. A missing zone or warehouse seeds empty strings.
    #[must_use]
    pub fn from_zone(zone: Option<&ZoneRecord>) -> Self {
        Self {
            name: zone.map(|z| z.name.clone()).unwrap_or_default(),
            warehouse: zone
                .and_then(ZoneRecord::primary_warehouse)
                .map(|w| w.id.to_string())
                .unwrap_or_default(),
        }
    }

    /// The selected warehouse, if any.
    #[must_use]
    pub fn warehouse_id(&self) -> Option<WarehouseId> {
        (!self.warehouse.is_empty()).then(|| WarehouseId::new(self.warehouse.clone()))
    }
}

/// Field names posted by the zone page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneField {
    Name,
    Warehouse,
}

impl ZoneField {
    /// Field names in rendering order.
    pub const NAMES: [&'static str; 2] = ["name", "warehouse"];

    /// Form name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for ZoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A posted field name that the zone form doesn't have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown zone field: {0}")]
pub struct UnknownZoneField(pub String);

impl FromStr for ZoneField {
    type Err = UnknownZoneField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "warehouse" => Ok(Self::Warehouse),
            other => Err(UnknownZoneField(other.to_string())),
        }
    }
}

impl FormData for ZoneFormData {
    type Field = ZoneField;

    fn set(&mut self, field: ZoneField, value: String) {
        match field {
            ZoneField::Name => self.name = value,
            ZoneField::Warehouse => self.warehouse = value,
        }
    }
}

/// Text shown in the warehouse field, tagged by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseDisplayValue {
    /// Name of the zone's assigned warehouse as the API reported it.
    External(String),
    /// Label of a choice the user picked on this page.
    Local(String),
}

impl WarehouseDisplayValue {
    /// Text to render.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::External(label) | Self::Local(label) => label,
        }
    }
}

/// Zone name/warehouse form plus the warehouse display value.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneEditForm {
    state: FormState<ZoneFormData>,
    display: WarehouseDisplayValue,
    /// Identity of the zone's first warehouse when `display` was last reset.
    external_warehouse: Option<WarehouseId>,
}

impl ZoneEditForm {
    /// Mount the form for `zone`.
    #[must_use]
    pub fn new(zone: Option<&ZoneRecord>) -> Self {
        let warehouse = zone.and_then(ZoneRecord::primary_warehouse);
        Self {
            state: FormState::new(ZoneFormData::from_zone(zone)),
            display: WarehouseDisplayValue::External(
                warehouse.map(|w| w.name.clone()).unwrap_or_default(),
            ),
            external_warehouse: warehouse.map(|w| w.id.clone()),
        }
    }

    /// Apply a change to any field.
    pub fn change(&mut self, field: ZoneField, value: impl Into<String>) {
        self.state.change(field, value);
    }

    /// Pick a warehouse: store the raw id and show the matching choice's label.
    pub fn change_warehouse(&mut self, value: impl Into<String>, choices: &[Choice]) {
        let value = value.into();
        self.display = WarehouseDisplayValue::Local(display_label(choices, &value));
        self.state.change(ZoneField::Warehouse, value);
    }

    /// The authoritative zone was replaced.
    ///
    /// Form data is left alone. The warehouse display value goes back to the
    /// zone's warehouse name only if that warehouse is a different one.
    pub fn sync_zone(&mut self, zone: &ZoneRecord) {
        let warehouse = zone.primary_warehouse();
        let identity = warehouse.map(|w| w.id.clone());
        if identity != self.external_warehouse {
            self.display = WarehouseDisplayValue::External(
                warehouse.map(|w| w.name.clone()).unwrap_or_default(),
            );
            self.external_warehouse = identity;
        }
    }

    /// Current form data.
    #[must_use]
    pub const fn data(&self) -> &ZoneFormData {
        self.state.data()
    }

    /// Whether any field was changed since mount.
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.state.has_changed()
    }

    /// Current warehouse display value.
    #[must_use]
    pub const fn warehouse_display(&self) -> &WarehouseDisplayValue {
        &self.display
    }

    /// Save is possible only on an enabled page with pending changes.
    #[must_use]
    pub const fn can_save(&self, disabled: bool) -> bool {
        !disabled && self.state.has_changed()
    }

    /// Hand the current data to `on_submit`; `None` when save is disabled.
    pub fn submit<R>(
        &self,
        disabled: bool,
        on_submit: impl FnOnce(ZoneFormData) -> R,
    ) -> Option<R> {
        self.can_save(disabled)
            .then(|| on_submit(self.state.data().clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::saleor::WarehouseRef;

    fn zone(warehouses: &[(&str, &str)]) -> ZoneRecord {
        ZoneRecord {
            id: "z1".into(),
            name: "EU".to_string(),
            default: false,
            countries: vec![],
            shipping_methods: vec![],
            warehouses: warehouses
                .iter()
                .map(|(id, name)| WarehouseRef {
                    id: (*id).into(),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    fn choices() -> Vec<Choice> {
        vec![
            Choice::new("Berlin", "w1"),
            Choice::new("Paris", "w2"),
        ]
    }

    #[test]
    fn test_mount_seeds_from_zone() {
        let form = ZoneEditForm::new(Some(&zone(&[("w1", "Berlin"), ("w2", "Paris")])));
        assert_eq!(form.data().name, "EU");
        assert_eq!(form.data().warehouse, "w1");
        assert_eq!(form.warehouse_display(), &WarehouseDisplayValue::External("Berlin".into()));
        assert!(!form.has_changed());
    }

    #[test]
    fn test_mount_without_zone_or_warehouse_seeds_empty() {
        let form = ZoneEditForm::new(None);
        assert_eq!(form.data(), &ZoneFormData::default());
        assert_eq!(form.warehouse_display().label(), "");

        let form = ZoneEditForm::new(Some(&zone(&[])));
        assert_eq!(form.data().warehouse, "");
        assert_eq!(form.data().warehouse_id(), None);
    }

    #[test]
    fn test_change_warehouse_uses_choice_label() {
        let mut form = ZoneEditForm::new(Some(&zone(&[("w1", "Berlin")])));
        form.change_warehouse("w2", &choices());

        assert_eq!(form.data().warehouse, "w2");
        assert_eq!(form.warehouse_display(), &WarehouseDisplayValue::Local("Paris".into()));
        assert!(form.has_changed());
    }

    #[test]
    fn test_change_warehouse_without_matching_choice_shows_raw_value() {
        let mut form = ZoneEditForm::new(None);
        form.change_warehouse("w9", &choices());
        assert_eq!(form.warehouse_display().label(), "w9");
    }

    #[test]
    fn test_sync_zone_keeps_local_pick_while_identity_is_unchanged() {
        let mut form = ZoneEditForm::new(Some(&zone(&[("w1", "Berlin")])));
        form.change_warehouse("w2", &choices());

        // Same first warehouse, renamed: local pick stays.
        form.sync_zone(&zone(&[("w1", "Berlin Mitte")]));
        assert_eq!(form.warehouse_display().label(), "Paris");

        // Different first warehouse: back to the external label.
        form.sync_zone(&zone(&[("w3", "Madrid")]));
        assert_eq!(form.warehouse_display(), &WarehouseDisplayValue::External("Madrid".into()));
        // Form data is not reseeded.
        assert_eq!(form.data().warehouse, "w2");
    }

    #[test]
    fn test_save_gating() {
        let mut form = ZoneEditForm::new(Some(&zone(&[])));
        assert!(!form.can_save(false));
        assert_eq!(form.submit(false, |data| data.name), None);

        form.change(ZoneField::Name, "EU West");
        assert!(form.can_save(false));
        assert!(!form.can_save(true));
        assert_eq!(form.submit(true, |data| data.name), None);
        assert_eq!(form.submit(false, |data| data.name), Some("EU West".to_string()));

        // Editing back to the seed keeps save enabled.
        form.change(ZoneField::Name, "EU");
        assert!(form.can_save(false));
    }

    #[test]
    fn test_zone_field_parse() {
        assert_eq!("name".parse::<ZoneField>().unwrap(), ZoneField::Name);
        assert_eq!("warehouse".parse::<ZoneField>().unwrap(), ZoneField::Warehouse);
        assert!("countries".parse::<ZoneField>().is_err());
    }
}
