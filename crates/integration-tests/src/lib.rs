//! Integration tests for Harbor.
//!
//! Every test runs against a [`wiremock`] server standing in for the GraphQL
//! commerce API, so no network access or credentials are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p harbor-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `saleor_client` - GraphQL client contract (request shape, error mapping)
//! - `shipping_routes` - admin routes driven through the full router

use std::net::{IpAddr, Ipv4Addr};

use harbor_admin::config::{AdminConfig, SaleorConfig};
use harbor_admin::saleor::SaleorClient;
use harbor_admin::state::AppState;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the mocked API expects.
pub const TEST_TOKEN: &str = "test-token";

/// Admin configuration pointing at `server`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_config(server: &MockServer) -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost".to_string(),
        saleor: SaleorConfig {
            api_url: Url::parse(&format!("{}/graphql/", server.uri())).unwrap(),
            token: SecretString::from(TEST_TOKEN),
            timeout_secs: 5,
        },
        edit_session_ttl_secs: 60,
        warehouse_page_size: 20,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// API client pointing at `server`.
#[must_use]
pub fn test_client(server: &MockServer) -> SaleorClient {
    SaleorClient::new(&test_config(server).saleor)
}

/// Application state pointing at `server`.
#[must_use]
pub fn test_state(server: &MockServer) -> AppState {
    AppState::new(test_config(server))
}

/// Answer every `operation` request with `{"data": data}`.
pub async fn mock_operation(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(body_partial_json(json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

/// Like [`mock_operation`], but the mock must be hit exactly `times` times.
pub async fn expect_operation(server: &MockServer, operation: &str, data: Value, times: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(times)
        .mount(server)
        .await;
}

// =============================================================================
// Fixtures
// =============================================================================

/// The "EU" zone: Germany, one price rate, shipped from Berlin.
#[must_use]
pub fn eu_zone() -> Value {
    json!({
        "id": "z1",
        "name": "EU",
        "default": false,
        "countries": [{ "code": "DE", "country": "Germany" }],
        "shippingMethods": [{
            "id": "r1",
            "name": "Standard",
            "type": "PRICE",
            "price": { "amount": 5.0, "currency": "USD" },
            "minimumOrderPrice": null,
            "maximumOrderPrice": null,
            "minimumOrderWeight": null,
            "maximumOrderWeight": null
        }],
        "warehouses": [{ "id": "w1", "name": "Berlin" }]
    })
}

/// A connection of warehouses with the given `(id, name)` nodes.
#[must_use]
pub fn warehouse_connection(nodes: &[(&str, &str)], end_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = nodes
        .iter()
        .map(|(id, name)| json!({ "node": { "id": id, "name": name } }))
        .collect();
    json!({
        "edges": edges,
        "pageInfo": { "hasNextPage": end_cursor.is_some(), "endCursor": end_cursor }
    })
}

/// Mount the queries the zone details page issues when it first opens.
pub async fn mock_zone_page(server: &MockServer) {
    mock_operation(server, "ShippingZone", json!({ "shippingZone": eu_zone() })).await;
    mock_operation(
        server,
        "SearchWarehouses",
        json!({ "search": warehouse_connection(&[("w1", "Berlin"), ("w2", "Paris")], None) }),
    )
    .await;
}
