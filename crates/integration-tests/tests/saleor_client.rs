//! Contract tests for the GraphQL client against a mocked API.

#![allow(clippy::unwrap_used)]

use harbor_admin::saleor::{SaleorError, ShippingZoneInput, WarehouseErrorCode};
use harbor_core::{CountryCode, ShippingMethodId, ShippingZoneId, WarehouseId, WeightUnit};
use harbor_integration_tests::{
    eu_zone, expect_operation, mock_operation, test_client, warehouse_connection,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn shipping_zone_returns_zone_record() {
    let server = MockServer::start().await;
    mock_operation(&server, "ShippingZone", json!({ "shippingZone": eu_zone() })).await;

    let zone = test_client(&server)
        .shipping_zone(&ShippingZoneId::new("z1"))
        .await
        .unwrap();

    assert_eq!(zone.name, "EU");
    assert_eq!(zone.countries[0].code.as_str(), "DE");
    assert_eq!(zone.shipping_methods[0].id.as_str(), "r1");
    assert_eq!(zone.warehouses[0].name, "Berlin");
}

#[tokio::test]
async fn shipping_zone_null_is_not_found() {
    let server = MockServer::start().await;
    mock_operation(&server, "ShippingZone", json!({ "shippingZone": null })).await;

    let result = test_client(&server)
        .shipping_zone(&ShippingZoneId::new("missing"))
        .await;

    assert!(matches!(result, Err(SaleorError::NotFound(_))));
}

#[tokio::test]
async fn shipping_zone_sends_id_variable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ShippingZone",
            "variables": { "id": "U2hpcHBpbmdab25lOjE=" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "shippingZone": eu_zone() }
        })))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .shipping_zone(&ShippingZoneId::new("U2hpcHBpbmdab25lOjE="))
        .await
        .unwrap();
}

#[tokio::test]
async fn top_level_errors_become_graphql_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "You do not have permission" }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).shop_countries().await.unwrap_err();

    let SaleorError::GraphQL(errors) = err else {
        panic!("expected GraphQL error, got {err:?}");
    };
    assert_eq!(errors[0].message, "You do not have permission");
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = test_client(&server).shop_countries().await;

    assert!(matches!(result, Err(SaleorError::Unauthorized(_))));
}

#[tokio::test]
async fn too_many_requests_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = test_client(&server).shop_countries().await;

    assert!(matches!(result, Err(SaleorError::RateLimited(7))));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = test_client(&server).shop_countries().await.unwrap_err();

    assert!(err.to_string().contains("HTTP 502"));
}

#[tokio::test]
async fn shipping_zones_reads_page_and_weight_unit() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ShippingZones",
        json!({
            "shippingZones": {
                "edges": [{ "node": {
                    "id": "z1",
                    "name": "EU",
                    "default": false,
                    "countries": [{ "code": "DE", "country": "Germany" }]
                } }],
                "pageInfo": { "hasNextPage": true, "endCursor": "c1" }
            },
            "shop": { "defaultWeightUnit": "KG" }
        }),
    )
    .await;

    let list = test_client(&server).shipping_zones(20, None).await.unwrap();

    assert_eq!(list.zones.items.len(), 1);
    assert_eq!(list.zones.items[0].name, "EU");
    assert!(list.zones.page_info.has_next_page);
    assert_eq!(list.zones.page_info.end_cursor.as_deref(), Some("c1"));
    assert_eq!(list.default_weight_unit, Some(WeightUnit::Kg));
}

#[tokio::test]
async fn search_warehouses_passes_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "SearchWarehouses",
            "variables": { "query": "ber", "first": 20, "after": "c1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "search": warehouse_connection(&[("w3", "Bern")], None) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server)
        .search_warehouses("ber", 20, Some("c1".to_string()))
        .await
        .unwrap();

    assert_eq!(page.items[0].id, WarehouseId::new("w3"));
    assert!(!page.page_info.has_next_page);
}

#[tokio::test]
async fn create_shipping_zone_returns_field_errors() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "CreateShippingZone",
        json!({
            "shippingZoneCreate": {
                "errors": [{ "field": "name", "message": "This field is required." }],
                "shippingZone": null
            }
        }),
    )
    .await;

    let result = test_client(&server)
        .create_shipping_zone(ShippingZoneInput {
            name: Some(String::new()),
            countries: Some(vec![CountryCode::parse("DE").unwrap()]),
            default: Some(false),
        })
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.errors[0].field.as_deref(), Some("name"));
    assert!(result.data.is_none());
}

#[tokio::test]
async fn missing_mutation_payload_is_an_error() {
    let server = MockServer::start().await;
    mock_operation(&server, "DeleteShippingZone", json!({ "shippingZoneDelete": null })).await;

    let result = test_client(&server)
        .delete_shipping_zone(&ShippingZoneId::new("z1"))
        .await;

    assert!(matches!(result, Err(SaleorError::GraphQL(_))));
}

#[tokio::test]
async fn delete_shipping_rate_succeeds_with_empty_errors() {
    let server = MockServer::start().await;
    expect_operation(
        &server,
        "DeleteShippingRate",
        json!({ "shippingPriceDelete": { "errors": [] } }),
        1,
    )
    .await;

    let errors = test_client(&server)
        .delete_shipping_rate(&ShippingMethodId::new("r1"))
        .await
        .unwrap();

    assert!(errors.is_empty());
}

#[tokio::test]
async fn bulk_delete_shipping_rates_sends_all_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "BulkDeleteShippingRate",
            "variables": { "ids": ["r1", "r2"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "shippingPriceBulkDelete": { "errors": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let errors = test_client(&server)
        .bulk_delete_shipping_rates(vec![ShippingMethodId::new("r1"), ShippingMethodId::new("r2")])
        .await
        .unwrap();

    assert!(errors.is_empty());
}

#[tokio::test]
async fn assign_warehouse_reports_warehouse_errors() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "AssignShippingZoneToWarehouse",
        json!({
            "assignWarehouseShippingZone": {
                "warehouseErrors": [{ "code": "NOT_FOUND", "field": "id" }]
            }
        }),
    )
    .await;

    let errors = test_client(&server)
        .assign_warehouse(&WarehouseId::new("w9"), &ShippingZoneId::new("z1"))
        .await
        .unwrap();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, WarehouseErrorCode::NotFound);
}

#[tokio::test]
async fn unknown_warehouse_error_code_is_tolerated() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "UnassignShippingZoneToWarehouse",
        json!({
            "unassignWarehouseShippingZone": {
                "warehouseErrors": [{ "code": "SOMETHING_NEW", "field": null }]
            }
        }),
    )
    .await;

    let errors = test_client(&server)
        .unassign_warehouse(&WarehouseId::new("w1"), &ShippingZoneId::new("z1"))
        .await
        .unwrap();

    assert_eq!(errors[0].code, WarehouseErrorCode::Unknown);
}

#[tokio::test]
async fn update_default_weight_unit_returns_new_unit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "UpdateDefaultWeightUnit",
            "variables": { "unit": "LB" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "shopSettingsUpdate": {
                    "errors": [],
                    "shop": { "defaultWeightUnit": "LB" }
                }
            }
        })))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .update_default_weight_unit(WeightUnit::Lb)
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.data, Some(WeightUnit::Lb));
}
