//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                   - Liveness check
//!
//! # Shipping zones
//! GET  /shipping                                 - Zone list + default weight unit
//! POST /shipping                                 - Create zone
//! POST /shipping/bulk-delete                     - Delete selected zones
//! POST /shipping/weight-unit                     - Update default weight unit (HTMX)
//! GET  /shipping/{id}                            - Zone details (mounts or resumes
//!                                                  an edit session)
//! POST /shipping/{id}/delete                     - Delete zone
//!
//! # Zone edit session (HTMX)
//! POST /shipping/{id}/edit/{session}/change      - Field change
//! POST /shipping/{id}/edit/{session}/warehouse   - Warehouse pick
//! GET  /shipping/{id}/edit/{session}/warehouses  - Warehouse search / load more
//! POST /shipping/{id}/edit/{session}/submit      - Save
//! POST /shipping/{id}/edit/{session}/cancel      - Discard form
//!
//! # Countries
//! GET  /shipping/{id}/countries/assign           - Country assignment page
//! POST /shipping/{id}/countries/assign           - Assign countries
//! POST /shipping/{id}/countries/{code}/unassign  - Unassign one country
//!
//! # Rates
//! GET  /shipping/{id}/rates/new?type=price|weight
//! POST /shipping/{id}/rates                      - Create rate
//! GET  /shipping/{id}/rates/{rate}               - Edit rate form
//! POST /shipping/{id}/rates/{rate}               - Update rate
//! POST /shipping/{id}/rates/{rate}/delete        - Delete rate
//! POST /shipping/{id}/rates/bulk-delete          - Delete selected rates
//!
//! # Warehouses
//! GET  /warehouses/new                           - Warehouse create form
//! POST /warehouses                               - Create warehouse
//! ```

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse, Response},
};

use crate::state::AppState;

pub mod shipping;
pub mod warehouses;

/// Build the application router (without `/health` and layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(shipping::router())
        .merge(warehouses::router())
}

/// Render a template, logging render failures instead of panicking.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Collect every value posted under `key` (repeated checkbox fields).
pub(crate) fn form_values<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// First value posted under `key`.
pub(crate) fn form_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values_collects_repeated_keys() {
        let pairs = vec![
            ("ids".to_string(), "r1".to_string()),
            ("session".to_string(), "s".to_string()),
            ("ids".to_string(), "r2".to_string()),
        ];
        assert_eq!(form_values(&pairs, "ids"), vec!["r1", "r2"]);
        assert_eq!(form_value(&pairs, "session"), Some("s"));
        assert_eq!(form_value(&pairs, "missing"), None);
    }
}
