//! Shipping zone route handlers.
//!
//! The zone details page keeps its state in an edit session (see
//! [`crate::pages::EditSessions`]). Pages that hang off the details page
//! (rates, countries, warehouse creation) carry the session id along and
//! apply their mutation outcome to it before redirecting back, so the details
//! page resumes without refetching the zone.

use axum::{
    Router,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use harbor_core::ShippingZoneId;
use serde::Deserialize;
use uuid::Uuid;

use crate::saleor::{FieldScoped, SaleorError, ZoneRecord};
use crate::state::AppState;

mod countries;
mod details;
mod list;
mod rates;

pub use details::ZonePageView;

// =============================================================================
// Router
// =============================================================================

/// Build the shipping router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Zone list
        .route("/shipping", get(list::index).post(list::create))
        .route("/shipping/bulk-delete", post(list::bulk_delete))
        .route("/shipping/weight-unit", post(list::update_weight_unit))
        // Zone details
        .route("/shipping/{id}", get(details::show))
        .route("/shipping/{id}/delete", post(list::delete))
        .route("/shipping/{id}/edit/{session}/change", post(details::change))
        .route("/shipping/{id}/edit/{session}/warehouse", post(details::change_warehouse))
        .route("/shipping/{id}/edit/{session}/warehouses", get(details::search_warehouses))
        .route("/shipping/{id}/edit/{session}/submit", post(details::submit))
        .route("/shipping/{id}/edit/{session}/cancel", post(details::cancel))
        // Countries
        .route(
            "/shipping/{id}/countries/assign",
            get(countries::assign_page).post(countries::assign),
        )
        .route("/shipping/{id}/countries/{code}/unassign", post(countries::unassign))
        // Rates
        .route("/shipping/{id}/rates/new", get(rates::new_rate))
        .route("/shipping/{id}/rates", post(rates::create))
        .route("/shipping/{id}/rates/bulk-delete", post(rates::bulk_delete))
        .route("/shipping/{id}/rates/{rate}", get(rates::edit).post(rates::update))
        .route("/shipping/{id}/rates/{rate}/delete", post(rates::delete))
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Optional edit session carried by pages linked from the details page.
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session: Option<Uuid>,
}

/// Path of the details page for `id`.
#[must_use]
pub fn zone_path(id: &ShippingZoneId) -> String {
    format!("/shipping/{}", urlencoding::encode(id.as_str()))
}

/// Details page URL, resuming `session` when given.
#[must_use]
pub fn zone_url(id: &ShippingZoneId, session: Option<Uuid>) -> String {
    session.map_or_else(
        || zone_path(id),
        |session| format!("{}?session={session}", zone_path(id)),
    )
}

/// Path of an edit session's endpoints.
#[must_use]
pub fn session_path(id: &ShippingZoneId, session: Uuid) -> String {
    format!("{}/edit/{session}", zone_path(id))
}

/// Parse a posted session id; blank or malformed values mean "no session".
fn parse_session(value: Option<&str>) -> Option<Uuid> {
    value.and_then(|v| Uuid::parse_str(v.trim()).ok())
}

/// Messages of mutation errors joined for a page-level notice.
pub(crate) fn errors_message<E: FieldScoped>(errors: &[E]) -> String {
    errors
        .iter()
        .map(FieldScoped::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}

/// The edit session is gone: send the browser back to a fresh details page.
fn session_expired(id: &ShippingZoneId, headers: &HeaderMap) -> Response {
    let url = zone_path(id);
    tracing::info!(zone_id = %id, "Edit session expired");
    if is_htmx(headers) {
        (StatusCode::OK, [("HX-Redirect", url)]).into_response()
    } else {
        Redirect::to(&url).into_response()
    }
}

/// The zone as the session sees it, falling back to the API.
async fn current_zone(
    state: &AppState,
    id: &ShippingZoneId,
    session: Option<Uuid>,
) -> Result<ZoneRecord, SaleorError> {
    if let Some(session) = session
        && let Some(page) = state.sessions().get(session, id).await
    {
        return Ok(page.zone().clone());
    }
    state.saleor().shipping_zone(id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_paths_encode_ids() {
        let id = ShippingZoneId::new("U2hpcHBpbmdab25lOjE=");
        assert_eq!(zone_path(&id), "/shipping/U2hpcHBpbmdab25lOjE%3D");

        let session = Uuid::nil();
        assert_eq!(
            zone_url(&id, Some(session)),
            format!("/shipping/U2hpcHBpbmdab25lOjE%3D?session={session}")
        );
        assert_eq!(
            session_path(&id, session),
            format!("/shipping/U2hpcHBpbmdab25lOjE%3D/edit/{session}")
        );
    }

    #[test]
    fn test_parse_session_ignores_garbage() {
        assert_eq!(parse_session(None), None);
        assert_eq!(parse_session(Some("")), None);
        assert_eq!(parse_session(Some("not-a-uuid")), None);
        assert_eq!(
            parse_session(Some("00000000-0000-0000-0000-000000000000")),
            Some(Uuid::nil())
        );
    }
}
