//! Type conversions between the generated `graphql_client` types and the
//! domain types in [`super::types`].
//!
//! Response conversions take a whole `ResponseData` and return `None` when
//! the mutation payload itself is missing; the client turns that into an
//! error.

use harbor_core::{
    Country, CountryCode, Money, ShippingMethodId, ShippingZoneId, WarehouseId, Weight,
    WeightUnit,
};
use rust_decimal::Decimal;
use tracing::warn;

use super::queries::{
    assign_shipping_zone_to_warehouse, bulk_delete_shipping_rate, bulk_delete_shipping_zone,
    create_shipping_rate, create_shipping_zone, create_warehouse, delete_shipping_rate,
    delete_shipping_zone, search_warehouses, shipping_zone, shipping_zones, shop_countries,
    unassign_shipping_zone_to_warehouse, update_default_weight_unit, update_shipping_rate,
    update_shipping_zone,
};
use super::shipping::ShippingZoneList;
use super::types::{
    MutationResult, Page, PageInfo, RateRecord, ShippingMethodType, ShippingPriceInput,
    ShippingZoneInput, UserError, WarehouseCreateInput, WarehouseError, WarehouseErrorCode,
    WarehouseRef, ZoneRecord, ZoneSummary,
};

// =============================================================================
// Helper functions
// =============================================================================

/// Name of a generated enum value (`KG`, `PRICE`, `Other("X")`).
fn enum_name<T: std::fmt::Debug>(value: &T) -> String {
    format!("{value:?}")
}

fn country(code: &str, name: String) -> Option<Country> {
    match CountryCode::parse(code) {
        Ok(code) => Some(Country {
            code,
            country: name,
        }),
        Err(e) => {
            warn!(code, error = %e, "Skipping country with invalid code");
            None
        }
    }
}

fn money(amount: f64, currency: String) -> Money {
    let amount = Decimal::try_from(amount).unwrap_or_else(|e| {
        warn!(amount, error = %e, "Amount out of decimal range");
        Decimal::ZERO
    });
    Money::new(amount, currency)
}

fn weight_unit<T: std::fmt::Debug>(unit: &T) -> WeightUnit {
    let name = enum_name(unit);
    name.parse().unwrap_or_else(|_| {
        warn!(unit = %name, "Unknown weight unit, using the default");
        WeightUnit::default()
    })
}

fn method_type<T: std::fmt::Debug>(value: &T) -> Option<ShippingMethodType> {
    match enum_name(value).as_str() {
        "PRICE" => Some(ShippingMethodType::Price),
        "WEIGHT" => Some(ShippingMethodType::Weight),
        other => {
            warn!(method_type = other, "Skipping rate with unknown type");
            None
        }
    }
}

fn warehouse_error_code<T: std::fmt::Debug>(code: &T) -> WarehouseErrorCode {
    match enum_name(code).as_str() {
        "ALREADY_EXISTS" => WarehouseErrorCode::AlreadyExists,
        "GRAPHQL_ERROR" => WarehouseErrorCode::GraphqlError,
        "INVALID" => WarehouseErrorCode::Invalid,
        "NOT_FOUND" => WarehouseErrorCode::NotFound,
        "REQUIRED" => WarehouseErrorCode::Required,
        "UNIQUE" => WarehouseErrorCode::Unique,
        _ => WarehouseErrorCode::Unknown,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `errors { field message }` into [`UserError`]s.
macro_rules! user_errors {
    ($errors:expr) => {
        $errors
            .into_iter()
            .map(|e| UserError {
                field: e.field,
                message: e.message,
            })
            .collect::<Vec<_>>()
    };
}

/// `warehouseErrors { code field }` into [`WarehouseError`]s.
macro_rules! warehouse_errors {
    ($errors:expr) => {
        $errors
            .into_iter()
            .map(|e| WarehouseError {
                code: warehouse_error_code(&e.code),
                field: e.field,
            })
            .collect::<Vec<_>>()
    };
}

/// `{ id name default countries { code country } }` into a [`ZoneSummary`].
macro_rules! zone_summary {
    ($zone:expr) => {{
        let zone = $zone;
        ZoneSummary {
            id: ShippingZoneId::new(zone.id),
            name: zone.name,
            default: zone.default,
            countries: zone
                .countries
                .into_iter()
                .filter_map(|c| country(&c.code, c.country))
                .collect(),
        }
    }};
}

/// The full zone selection (countries, rates, warehouses) into a [`ZoneRecord`].
///
/// The same selection is generated once per operation that requests it, so
/// this works on field names rather than on one concrete type.
macro_rules! zone_record {
    ($zone:expr) => {{
        let zone = $zone;
        ZoneRecord {
            id: ShippingZoneId::new(zone.id),
            name: zone.name,
            default: zone.default,
            countries: zone
                .countries
                .into_iter()
                .filter_map(|c| country(&c.code, c.country))
                .collect(),
            shipping_methods: zone
                .shipping_methods
                .into_iter()
                .filter_map(|rate| {
                    Some(RateRecord {
                        method_type: method_type(&rate.type_)?,
                        id: ShippingMethodId::new(rate.id),
                        name: rate.name,
                        price: rate.price.map(|m| money(m.amount, m.currency)),
                        minimum_order_price: rate
                            .minimum_order_price
                            .map(|m| money(m.amount, m.currency)),
                        maximum_order_price: rate
                            .maximum_order_price
                            .map(|m| money(m.amount, m.currency)),
                        minimum_order_weight: rate.minimum_order_weight.map(|w| Weight {
                            unit: weight_unit(&w.unit),
                            value: w.value,
                        }),
                        maximum_order_weight: rate.maximum_order_weight.map(|w| Weight {
                            unit: weight_unit(&w.unit),
                            value: w.value,
                        }),
                    })
                })
                .collect(),
            warehouses: zone
                .warehouses
                .into_iter()
                .map(|w| WarehouseRef {
                    id: WarehouseId::new(w.id),
                    name: w.name,
                })
                .collect(),
        }
    }};
}

/// A `{ edges { node } pageInfo }` connection into a [`Page`].
macro_rules! page {
    ($connection:expr, |$node:ident| $convert:expr) => {
        $connection.map_or_else(Page::default, |connection| Page {
            items: connection
                .edges
                .into_iter()
                .map(|edge| {
                    let $node = edge.node;
                    $convert
                })
                .collect(),
            page_info: PageInfo {
                has_next_page: connection.page_info.has_next_page,
                end_cursor: connection.page_info.end_cursor,
            },
        })
    };
}

// =============================================================================
// Query conversions
// =============================================================================

pub fn convert_shipping_zone(data: shipping_zone::ResponseData) -> Option<ZoneRecord> {
    data.shipping_zone.map(|zone| zone_record!(zone))
}

pub fn convert_shipping_zones(data: shipping_zones::ResponseData) -> ShippingZoneList {
    ShippingZoneList {
        zones: page!(data.shipping_zones, |zone| zone_summary!(zone)),
        default_weight_unit: data.shop.default_weight_unit.map(|unit| weight_unit(&unit)),
    }
}

pub fn convert_warehouse_search(data: search_warehouses::ResponseData) -> Page<WarehouseRef> {
    page!(data.search, |warehouse| WarehouseRef {
        id: WarehouseId::new(warehouse.id),
        name: warehouse.name,
    })
}

pub fn convert_shop_countries(data: shop_countries::ResponseData) -> Vec<Country> {
    data.shop
        .countries
        .into_iter()
        .filter_map(|c| country(&c.code, c.country))
        .collect()
}

// =============================================================================
// Mutation conversions
// =============================================================================

pub fn convert_create_shipping_zone(
    data: create_shipping_zone::ResponseData,
) -> Option<MutationResult<ZoneSummary>> {
    data.shipping_zone_create.map(|payload| MutationResult {
        errors: user_errors!(payload.errors),
        data: payload.shipping_zone.map(|zone| zone_summary!(zone)),
    })
}

pub fn convert_update_shipping_zone(
    data: update_shipping_zone::ResponseData,
) -> Option<MutationResult<ZoneSummary>> {
    data.shipping_zone_update.map(|payload| MutationResult {
        errors: user_errors!(payload.errors),
        data: payload.shipping_zone.map(|zone| zone_summary!(zone)),
    })
}

pub fn convert_delete_shipping_zone(
    data: delete_shipping_zone::ResponseData,
) -> Option<Vec<UserError>> {
    data.shipping_zone_delete
        .map(|payload| user_errors!(payload.errors))
}

pub fn convert_bulk_delete_shipping_zone(
    data: bulk_delete_shipping_zone::ResponseData,
) -> Option<Vec<UserError>> {
    data.shipping_zone_bulk_delete
        .map(|payload| user_errors!(payload.errors))
}

pub fn convert_create_shipping_rate(
    data: create_shipping_rate::ResponseData,
) -> Option<MutationResult<ZoneRecord>> {
    data.shipping_price_create.map(|payload| MutationResult {
        errors: user_errors!(payload.errors),
        data: payload.shipping_zone.map(|zone| zone_record!(zone)),
    })
}

pub fn convert_update_shipping_rate(
    data: update_shipping_rate::ResponseData,
) -> Option<MutationResult<ZoneRecord>> {
    data.shipping_price_update.map(|payload| MutationResult {
        errors: user_errors!(payload.errors),
        data: payload.shipping_zone.map(|zone| zone_record!(zone)),
    })
}

pub fn convert_delete_shipping_rate(
    data: delete_shipping_rate::ResponseData,
) -> Option<Vec<UserError>> {
    data.shipping_price_delete
        .map(|payload| user_errors!(payload.errors))
}

pub fn convert_bulk_delete_shipping_rate(
    data: bulk_delete_shipping_rate::ResponseData,
) -> Option<Vec<UserError>> {
    data.shipping_price_bulk_delete
        .map(|payload| user_errors!(payload.errors))
}

pub fn convert_assign_warehouse(
    data: assign_shipping_zone_to_warehouse::ResponseData,
) -> Option<Vec<WarehouseError>> {
    data.assign_warehouse_shipping_zone
        .map(|payload| warehouse_errors!(payload.warehouse_errors))
}

pub fn convert_unassign_warehouse(
    data: unassign_shipping_zone_to_warehouse::ResponseData,
) -> Option<Vec<WarehouseError>> {
    data.unassign_warehouse_shipping_zone
        .map(|payload| warehouse_errors!(payload.warehouse_errors))
}

pub fn convert_create_warehouse(
    data: create_warehouse::ResponseData,
) -> Option<MutationResult<WarehouseRef, WarehouseError>> {
    data.create_warehouse.map(|payload| MutationResult {
        errors: warehouse_errors!(payload.warehouse_errors),
        data: payload.warehouse.map(|w| WarehouseRef {
            id: WarehouseId::new(w.id),
            name: w.name,
        }),
    })
}

pub fn convert_default_weight_unit(
    data: update_default_weight_unit::ResponseData,
) -> Option<MutationResult<WeightUnit>> {
    data.shop_settings_update.map(|payload| MutationResult {
        errors: user_errors!(payload.errors),
        data: payload
            .shop
            .and_then(|shop| shop.default_weight_unit)
            .map(|unit| weight_unit(&unit)),
    })
}

// =============================================================================
// Inputs
// =============================================================================

macro_rules! shipping_zone_input {
    ($module:ident, $input:expr) => {{
        let input: ShippingZoneInput = $input;
        $module::ShippingZoneInput {
            name: input.name,
            countries: input
                .countries
                .map(|codes| codes.into_iter().map(String::from).collect()),
            default: input.default,
        }
    }};
}

macro_rules! shipping_price_input {
    ($module:ident, $input:expr) => {{
        let input: ShippingPriceInput = $input;
        $module::ShippingPriceInput {
            name: input.name,
            price: input.price,
            minimum_order_price: input.minimum_order_price,
            maximum_order_price: input.maximum_order_price,
            minimum_order_weight: input.minimum_order_weight,
            maximum_order_weight: input.maximum_order_weight,
            type_: input.method_type.map(|method_type| match method_type {
                ShippingMethodType::Price => $module::ShippingMethodTypeEnum::PRICE,
                ShippingMethodType::Weight => $module::ShippingMethodTypeEnum::WEIGHT,
            }),
            shipping_zone: input.shipping_zone.map(ShippingZoneId::into_inner),
        }
    }};
}

pub fn create_shipping_zone_input(
    input: ShippingZoneInput,
) -> create_shipping_zone::ShippingZoneInput {
    shipping_zone_input!(create_shipping_zone, input)
}

pub fn update_shipping_zone_input(
    input: ShippingZoneInput,
) -> update_shipping_zone::ShippingZoneInput {
    shipping_zone_input!(update_shipping_zone, input)
}

pub fn create_shipping_rate_input(
    input: ShippingPriceInput,
) -> create_shipping_rate::ShippingPriceInput {
    shipping_price_input!(create_shipping_rate, input)
}

pub fn update_shipping_rate_input(
    input: ShippingPriceInput,
) -> update_shipping_rate::ShippingPriceInput {
    shipping_price_input!(update_shipping_rate, input)
}

/// Blank strings go out as `null` so the API applies its own defaults.
pub fn create_warehouse_input(
    input: WarehouseCreateInput,
) -> create_warehouse::WarehouseCreateInput {
    let address = input.address;
    create_warehouse::WarehouseCreateInput {
        name: input.name,
        company_name: non_empty(input.company_name),
        email: non_empty(input.email),
        address: create_warehouse::AddressInput {
            company_name: non_empty(address.company_name),
            street_address1: non_empty(address.street_address_1),
            street_address2: non_empty(address.street_address_2),
            city: non_empty(address.city),
            postal_code: non_empty(address.postal_code),
            country: non_empty(address.country),
            country_area: non_empty(address.country_area),
            phone: non_empty(address.phone),
        },
    }
}

pub fn weight_unit_input(unit: WeightUnit) -> update_default_weight_unit::WeightUnitsEnum {
    match unit {
        WeightUnit::G => update_default_weight_unit::WeightUnitsEnum::G,
        WeightUnit::Lb => update_default_weight_unit::WeightUnitsEnum::LB,
        WeightUnit::Oz => update_default_weight_unit::WeightUnitsEnum::OZ,
        WeightUnit::Kg => update_default_weight_unit::WeightUnitsEnum::KG,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zone_json() -> serde_json::Value {
        json!({
            "id": "z1",
            "name": "EU",
            "default": false,
            "countries": [
                {"code": "DE", "country": "Germany"},
                {"code": "??", "country": "Nowhere"}
            ],
            "shippingMethods": [{
                "id": "r1",
                "name": "Standard",
                "type": "PRICE",
                "price": {"amount": 5.5, "currency": "EUR"},
                "minimumOrderPrice": null,
                "maximumOrderPrice": {"amount": 100.0, "currency": "EUR"},
                "minimumOrderWeight": {"unit": "LB", "value": 2.0},
                "maximumOrderWeight": null
            }, {
                "id": "r2",
                "name": "Teleport",
                "type": "TELEPORT",
                "price": null,
                "minimumOrderPrice": null,
                "maximumOrderPrice": null,
                "minimumOrderWeight": null,
                "maximumOrderWeight": null
            }],
            "warehouses": [{"id": "w1", "name": "Berlin"}]
        })
    }

    #[test]
    fn test_convert_shipping_zone() {
        let data: shipping_zone::ResponseData =
            serde_json::from_value(json!({ "shippingZone": zone_json() })).unwrap();

        let zone = convert_shipping_zone(data).unwrap();

        assert_eq!(zone.name, "EU");
        assert_eq!(zone.countries.len(), 1);
        assert_eq!(zone.shipping_methods.len(), 1);
        let rate = &zone.shipping_methods[0];
        assert_eq!(rate.method_type, ShippingMethodType::Price);
        assert_eq!(rate.price.as_ref().unwrap().amount, Decimal::new(55, 1));
        assert_eq!(
            rate.maximum_order_price.as_ref().unwrap().amount,
            Decimal::from(100)
        );
        assert_eq!(rate.minimum_order_weight.unwrap().unit, WeightUnit::Lb);
        assert_eq!(zone.primary_warehouse().unwrap().name, "Berlin");
    }

    #[test]
    fn test_convert_missing_zone() {
        let data: shipping_zone::ResponseData =
            serde_json::from_value(json!({ "shippingZone": null })).unwrap();
        assert!(convert_shipping_zone(data).is_none());
    }

    #[test]
    fn test_unknown_warehouse_error_code() {
        let data: unassign_shipping_zone_to_warehouse::ResponseData =
            serde_json::from_value(json!({
                "unassignWarehouseShippingZone": {
                    "warehouseErrors": [{"code": "SOMETHING_NEW", "field": "name"}]
                }
            }))
            .unwrap();

        let errors = convert_unassign_warehouse(data).unwrap();

        assert_eq!(errors[0].code, WarehouseErrorCode::Unknown);
        assert_eq!(errors[0].code.message(), "Unknown error");
    }

    #[test]
    fn test_zone_input_omits_unset_fields() {
        let body = update_shipping_zone::Variables {
            id: "z1".to_string(),
            input: update_shipping_zone_input(ShippingZoneInput {
                name: Some("Europe".to_string()),
                ..ShippingZoneInput::default()
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["input"], json!({"name": "Europe"}));
    }

    #[test]
    fn test_rate_input_sends_cleared_bounds_as_null() {
        let input = update_shipping_rate_input(ShippingPriceInput {
            name: Some("Express".to_string()),
            price: Some(Decimal::new(1250, 2)),
            method_type: Some(ShippingMethodType::Weight),
            ..ShippingPriceInput::default()
        });
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["price"], "12.50");
        assert_eq!(value["type"], "WEIGHT");
        assert!(value["maximumOrderPrice"].is_null());
        assert!(value.as_object().unwrap().contains_key("maximumOrderWeight"));
    }

    #[test]
    fn test_warehouse_input_blanks_become_null() {
        let input = create_warehouse_input(WarehouseCreateInput {
            name: "Oslo".to_string(),
            company_name: String::new(),
            email: "ops@example.com".to_string(),
            address: harbor_core::AddressRecord {
                city: "Oslo".to_string(),
                country: "NO".to_string(),
                ..Default::default()
            },
        });
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["name"], "Oslo");
        assert!(value["companyName"].is_null());
        assert_eq!(value["address"]["city"], "Oslo");
        assert!(value["address"]["streetAddress1"].is_null());
    }
}
