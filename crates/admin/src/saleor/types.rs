//! Domain types for the shipping slice of the GraphQL API.
//!
//! The generated response types are converted into these (see
//! `conversions`); they are what the rest of the crate works with.

use harbor_core::{
    AddressRecord, Country, CountryCode, Money, ShippingMethodId, ShippingZoneId, WarehouseId,
    Weight,
};
use rust_decimal::Decimal;

// =============================================================================
// Records
// =============================================================================

/// Discriminant of a shipping rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingMethodType {
    Price,
    Weight,
}

impl ShippingMethodType {
    /// Lowercase name used in URLs (`price` / `weight`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Weight => "weight",
        }
    }

    /// Parse a URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "price" => Some(Self::Price),
            "weight" => Some(Self::Weight),
            _ => None,
        }
    }
}

/// A shipping rate belonging to a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub id: ShippingMethodId,
    pub name: String,
    pub method_type: ShippingMethodType,
    pub price: Option<Money>,
    pub minimum_order_price: Option<Money>,
    pub maximum_order_price: Option<Money>,
    pub minimum_order_weight: Option<Weight>,
    pub maximum_order_weight: Option<Weight>,
}

/// Reference to a warehouse. Zones point at warehouses, never own them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WarehouseRef {
    pub id: WarehouseId,
    pub name: String,
}

/// A shipping zone with everything the details page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRecord {
    pub id: ShippingZoneId,
    pub name: String,
    /// Catch-all zone for countries not assigned elsewhere.
    pub default: bool,
    pub countries: Vec<Country>,
    pub shipping_methods: Vec<RateRecord>,
    pub warehouses: Vec<WarehouseRef>,
}

impl ZoneRecord {
    /// The warehouse this zone ships from; only the first one counts.
    #[must_use]
    pub fn primary_warehouse(&self) -> Option<&WarehouseRef> {
        self.warehouses.first()
    }

    /// Country codes in display order.
    #[must_use]
    pub fn country_codes(&self) -> Vec<CountryCode> {
        self.countries.iter().map(|c| c.code.clone()).collect()
    }

    /// Merge the fields a zone create/update mutation returns.
    pub fn merge_summary(&mut self, summary: ZoneSummary) {
        self.id = summary.id;
        self.name = summary.name;
        self.default = summary.default;
        self.countries = summary.countries;
    }
}

/// The subset of a zone returned by zone create/update mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSummary {
    pub id: ShippingZoneId,
    pub name: String,
    pub default: bool,
    pub countries: Vec<Country>,
}

/// Cursor pagination info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            page_info: PageInfo::default(),
        }
    }
}

// =============================================================================
// Errors returned inside mutation payloads
// =============================================================================

/// Field-scoped error from a mutation's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    /// Input field the error refers to; `None` for non-field errors.
    pub field: Option<String>,
    pub message: Option<String>,
}

/// Error code in the warehouse mutations' `warehouseErrors` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseErrorCode {
    AlreadyExists,
    GraphqlError,
    Invalid,
    NotFound,
    Required,
    Unique,
    /// A code this admin doesn't know yet.
    Unknown,
}

impl WarehouseErrorCode {
    /// Message shown under the field.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AlreadyExists => "Already exists",
            Self::GraphqlError | Self::Unknown => "Unknown error",
            Self::Invalid => "Invalid value",
            Self::NotFound => "Not found",
            Self::Required => "This field is required",
            Self::Unique => "This needs to be unique",
        }
    }
}

/// Error envelope of the warehouse assignment mutations: `{code, field}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseError {
    pub code: WarehouseErrorCode,
    pub field: Option<String>,
}

/// Anything that can be shown under a named form field.
pub trait FieldScoped {
    /// Input field the error refers to.
    fn field(&self) -> Option<&str>;
    /// Text to show.
    fn message(&self) -> String;
}

impl FieldScoped for UserError {
    fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

impl FieldScoped for WarehouseError {
    fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    fn message(&self) -> String {
        self.code.message().to_string()
    }
}

/// Outcome of one mutation: the error list plus the entity it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult<T, E = UserError> {
    pub errors: Vec<E>,
    pub data: Option<T>,
}

impl<T, E> MutationResult<T, E> {
    /// Whether the API reported no errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Input for zone create/update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingZoneInput {
    pub name: Option<String>,
    /// Full replacement list of assigned countries.
    pub countries: Option<Vec<CountryCode>>,
    pub default: Option<bool>,
}

/// Input for rate create/update.
///
/// Every bound is sent, so `None` clears it on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingPriceInput {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub minimum_order_price: Option<Decimal>,
    pub maximum_order_price: Option<Decimal>,
    pub minimum_order_weight: Option<f64>,
    pub maximum_order_weight: Option<f64>,
    pub method_type: Option<ShippingMethodType>,
    pub shipping_zone: Option<ShippingZoneId>,
}

/// Input for warehouse creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehouseCreateInput {
    pub name: String,
    pub company_name: String,
    pub email: String,
    pub address: AddressRecord,
}
