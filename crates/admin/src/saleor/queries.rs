//! GraphQL operation definitions for the shipping API.
//!
//! Uses `graphql_client` to generate type-safe Rust code from the documents in
//! `graphql/saleor/queries/`, checked against `graphql/saleor/schema.graphql`.

use graphql_client::GraphQLQuery;

// =============================================================================
// Custom scalar type aliases (used by graphql_client)
// =============================================================================

/// Positive decimal amount; serializes as a string to keep precision.
type PositiveDecimal = rust_decimal::Decimal;

/// Weight value in the shop's default unit.
type WeightScalar = f64;

// =============================================================================
// Shipping zones
// =============================================================================

// Zone inputs skip unset fields: a name-only update must not send
// `countries: null`.

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ShippingZone;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ShippingZones;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ShopCountries;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone",
    skip_serializing_none
)]
pub struct CreateShippingZone;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone",
    skip_serializing_none
)]
pub struct UpdateShippingZone;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct DeleteShippingZone;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct BulkDeleteShippingZone;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_zones.graphql",
    response_derives = "Debug, Clone"
)]
pub struct UpdateDefaultWeightUnit;

// =============================================================================
// Shipping rates
// =============================================================================

// Unset rate bounds serialize as `null`, which clears them on update.

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_rates.graphql",
    response_derives = "Debug, Clone"
)]
pub struct CreateShippingRate;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_rates.graphql",
    response_derives = "Debug, Clone"
)]
pub struct UpdateShippingRate;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_rates.graphql",
    response_derives = "Debug, Clone"
)]
pub struct DeleteShippingRate;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/shipping_rates.graphql",
    response_derives = "Debug, Clone"
)]
pub struct BulkDeleteShippingRate;

// =============================================================================
// Warehouses
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/warehouses.graphql",
    response_derives = "Debug, Clone"
)]
pub struct SearchWarehouses;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/warehouses.graphql",
    response_derives = "Debug, Clone"
)]
pub struct CreateWarehouse;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/warehouses.graphql",
    response_derives = "Debug, Clone"
)]
pub struct AssignShippingZoneToWarehouse;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/saleor/schema.graphql",
    query_path = "graphql/saleor/queries/warehouses.graphql",
    response_derives = "Debug, Clone"
)]
pub struct UnassignShippingZoneToWarehouse;
