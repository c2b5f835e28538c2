//! Zone list: create, delete and the shop's default weight unit.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use harbor_core::{ShippingZoneId, WeightUnit};
use serde::Deserialize;
use tracing::instrument;

use super::{SessionQuery, errors_message, zone_path, zone_url};
use crate::error::AppError;
use crate::filters;
use crate::routes::form_values;
use crate::saleor::{ShippingZoneInput, ZoneSummary};
use crate::state::AppState;

/// Zones per list page.
const ZONES_PAGE_SIZE: i64 = 20;

// =============================================================================
// Views
// =============================================================================

/// Zone row for the list table.
#[derive(Debug, Clone)]
pub struct ZoneRowView {
    pub id: String,
    pub name: String,
    pub href: String,
    pub countries: String,
    pub default: bool,
}

impl From<&ZoneSummary> for ZoneRowView {
    fn from(zone: &ZoneSummary) -> Self {
        let countries = if zone.countries.is_empty() {
            "-".to_string()
        } else {
            zone.countries
                .iter()
                .map(|c| c.country.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            id: zone.id.to_string(),
            name: zone.name.clone(),
            href: zone_path(&zone.id),
            countries,
            default: zone.default,
        }
    }
}

/// Weight unit option for the settings select.
#[derive(Debug, Clone)]
pub struct WeightUnitOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn weight_unit_options(current: Option<WeightUnit>) -> Vec<WeightUnitOption> {
    WeightUnit::ALL
        .iter()
        .map(|unit| WeightUnitOption {
            value: unit.as_str(),
            label: unit.symbol(),
            selected: Some(*unit) == current,
        })
        .collect()
}

/// Zone list page template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/index.html")]
pub struct ShippingZonesTemplate {
    pub current_path: String,
    pub error_message: Option<String>,
    pub zones: Vec<ZoneRowView>,
    pub has_next_page: bool,
    pub next_cursor: Option<String>,
    pub weight_units: Vec<WeightUnitOption>,
}

/// Result line shown next to the weight unit select (HTMX).
#[derive(Template)]
#[template(path = "shipping/_weight_unit_status.html")]
pub struct WeightUnitStatus {
    pub ok: bool,
    pub message: String,
}

// =============================================================================
// Forms
// =============================================================================

/// List pagination.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub after: Option<String>,
}

/// New zone.
#[derive(Debug, Deserialize)]
pub struct CreateZoneForm {
    pub name: String,
}

/// Shop default weight unit.
#[derive(Debug, Deserialize)]
pub struct WeightUnitForm {
    pub unit: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Zone list page.
///
/// # Errors
///
/// Returns 502 if the API request fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    list_page(&state, query.after, None).await
}

/// Create a zone with no countries and open it.
///
/// # Errors
///
/// Returns 502 if the API request fails.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CreateZoneForm>,
) -> Result<Response, AppError> {
    let input = ShippingZoneInput {
        name: Some(form.name.trim().to_string()),
        countries: Some(vec![]),
        default: Some(false),
    };

    let result = state.saleor().create_shipping_zone(input).await?;
    if !result.is_success() {
        return list_page(&state, None, Some(errors_message(&result.errors))).await;
    }

    let zone = result
        .data
        .ok_or_else(|| AppError::Internal("zone create returned no zone".to_string()))?;
    tracing::info!(zone_id = %zone.id, name = %zone.name, "Shipping zone created");
    Ok(Redirect::to(&zone_path(&zone.id)).into_response())
}

/// Delete the selected zones.
///
/// # Errors
///
/// Returns 502 if the API request fails.
#[instrument(skip(state, form))]
pub async fn bulk_delete(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let ids: Vec<ShippingZoneId> = form_values(&form, "ids")
        .into_iter()
        .map(ShippingZoneId::new)
        .collect();
    if ids.is_empty() {
        return Ok(Redirect::to("/shipping").into_response());
    }

    let count = ids.len();
    let errors = state.saleor().bulk_delete_shipping_zones(ids).await?;
    if !errors.is_empty() {
        return list_page(&state, None, Some(errors_message(&errors))).await;
    }

    tracing::info!(count, "Shipping zones deleted");
    Ok(Redirect::to("/shipping").into_response())
}

/// Delete one zone, dropping its edit session.
///
/// # Errors
///
/// Returns 502 if the API request fails.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let errors = state.saleor().delete_shipping_zone(&id).await?;

    if !errors.is_empty() {
        let message = errors_message(&errors);
        if let Some(session) = query.session
            && state
                .sessions()
                .update(session, &id, |page| page.set_notice(message.clone()))
                .await
                .is_some()
        {
            return Ok(Redirect::to(&zone_url(&id, Some(session))).into_response());
        }
        return list_page(&state, None, Some(message)).await;
    }

    if let Some(session) = query.session {
        state.sessions().discard(session).await;
    }
    tracing::info!(zone_id = %id, "Shipping zone deleted");
    Ok(Redirect::to("/shipping").into_response())
}

/// Change the shop's default weight unit (HTMX).
#[instrument(skip(state))]
pub async fn update_weight_unit(
    State(state): State<AppState>,
    Form(form): Form<WeightUnitForm>,
) -> impl IntoResponse {
    let unit = match form.unit.parse::<WeightUnit>() {
        Ok(unit) => unit,
        Err(e) => return weight_unit_status(StatusCode::BAD_REQUEST, false, e.to_string()),
    };

    match state.saleor().update_default_weight_unit(unit).await {
        Ok(result) if result.is_success() => {
            tracing::info!(unit = %unit, "Default weight unit updated");
            weight_unit_status(StatusCode::OK, true, "Saved".to_string())
        }
        Ok(result) => weight_unit_status(
            StatusCode::BAD_REQUEST,
            false,
            errors_message(&result.errors),
        ),
        Err(e) => {
            tracing::error!(unit = %unit, error = %e, "Failed to update default weight unit");
            weight_unit_status(
                StatusCode::BAD_GATEWAY,
                false,
                "Could not reach the API".to_string(),
            )
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn list_page(
    state: &AppState,
    after: Option<String>,
    error_message: Option<String>,
) -> Result<Response, AppError> {
    let list = state.saleor().shipping_zones(ZONES_PAGE_SIZE, after).await?;

    Ok(ShippingZonesTemplate {
        current_path: "/shipping".to_string(),
        error_message,
        zones: list.zones.items.iter().map(ZoneRowView::from).collect(),
        has_next_page: list.zones.page_info.has_next_page,
        next_cursor: list.zones.page_info.end_cursor,
        weight_units: weight_unit_options(list.default_weight_unit),
    }
    .into_response())
}

fn weight_unit_status(status: StatusCode, ok: bool, message: String) -> Response {
    let trigger = if ok {
        "weight-unit-updated"
    } else {
        "weight-unit-error"
    };
    let body = WeightUnitStatus { ok, message }
        .render()
        .unwrap_or_else(|e| {
            tracing::error!("Template render error: {}", e);
            String::new()
        });
    (status, [("HX-Trigger", trigger)], Html(body)).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use harbor_core::{Country, CountryCode};

    #[test]
    fn test_zone_row_lists_country_names() {
        let zone = ZoneSummary {
            id: "z1".into(),
            name: "EU".to_string(),
            default: false,
            countries: vec![
                Country {
                    code: CountryCode::parse("DE").unwrap(),
                    country: "Germany".to_string(),
                },
                Country {
                    code: CountryCode::parse("FR").unwrap(),
                    country: "France".to_string(),
                },
            ],
        };
        let row = ZoneRowView::from(&zone);
        assert_eq!(row.countries, "Germany, France");
        assert_eq!(row.href, "/shipping/z1");

        let empty = ZoneRowView::from(&ZoneSummary {
            countries: vec![],
            ..zone
        });
        assert_eq!(empty.countries, "-");
    }

    #[test]
    fn test_weight_unit_options_mark_current() {
        let options = weight_unit_options(Some(WeightUnit::Lb));
        let selected: Vec<&str> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["LB"]);
        assert!(weight_unit_options(None).iter().all(|o| !o.selected));
    }

    #[test]
    fn test_weight_unit_status_escapes_message() {
        let html = WeightUnitStatus {
            ok: false,
            message: "<b>nope</b>".to_string(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("text-red-600"));
    }
}
