//! Country assignment for a zone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use harbor_core::{Country, CountryCode, ShippingZoneId};
use tracing::instrument;
use uuid::Uuid;

use super::{SessionQuery, current_zone, errors_message, parse_session, zone_path, zone_url};
use crate::error::AppError;
use crate::filters;
use crate::routes::{form_value, form_values};
use crate::saleor::{ShippingZoneInput, ZoneRecord};
use crate::state::AppState;

/// Checkbox for one shop country.
#[derive(Debug, Clone)]
pub struct CountryOption {
    pub code: String,
    pub name: String,
    pub checked: bool,
}

/// Country assignment page template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/countries_assign.html")]
pub struct CountriesAssignTemplate {
    pub current_path: String,
    pub error_message: Option<String>,
    pub zone_name: String,
    pub action: String,
    pub back_href: String,
    pub session: String,
    pub countries: Vec<CountryOption>,
}

/// Shop countries, ticked where `zone` already ships.
fn country_options(shop: &[Country], zone: &ZoneRecord) -> Vec<CountryOption> {
    shop.iter()
        .map(|country| CountryOption {
            code: country.code.to_string(),
            name: country.country.clone(),
            checked: zone.countries.iter().any(|c| c.code == country.code),
        })
        .collect()
}

/// Country assignment page.
///
/// # Errors
///
/// Returns 404 when the zone doesn't exist, 502 when the API is unreachable.
#[instrument(skip(state))]
pub async fn assign_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let zone = current_zone(&state, &id, query.session).await?;
    assign_response(&state, &zone, query.session, None).await
}

/// Replace the zone's countries with the ticked ones.
///
/// # Errors
///
/// Returns 400 for malformed country codes, 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let session = parse_session(form_value(&form, "session"));
    let codes = form_values(&form, "countries")
        .into_iter()
        .map(CountryCode::parse)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let input = ShippingZoneInput {
        countries: Some(codes),
        ..ShippingZoneInput::default()
    };
    let result = state.saleor().update_shipping_zone(&id, input).await?;

    if !result.is_success() {
        let zone = current_zone(&state, &id, session).await?;
        return assign_response(&state, &zone, session, Some(errors_message(&result.errors)))
            .await;
    }

    if let Some(summary) = result.data {
        tracing::info!(zone_id = %id, count = summary.countries.len(), "Zone countries assigned");
        apply_countries(&state, &id, session, summary.countries).await;
    }
    Ok(Redirect::to(&zone_url(&id, session)).into_response())
}

/// Remove one country from the zone.
///
/// # Errors
///
/// Returns 404 when the zone doesn't exist, 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn unassign(
    State(state): State<AppState>,
    Path((id, code)): Path<(String, String)>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let session = parse_session(form_value(&form, "session"));
    let code = CountryCode::parse(&code).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let zone = current_zone(&state, &id, session).await?;
    let remaining: Vec<CountryCode> = zone
        .country_codes()
        .into_iter()
        .filter(|c| *c != code)
        .collect();

    let input = ShippingZoneInput {
        countries: Some(remaining),
        ..ShippingZoneInput::default()
    };
    let result = state.saleor().update_shipping_zone(&id, input).await?;

    if !result.is_success() {
        let message = errors_message(&result.errors);
        tracing::warn!(zone_id = %id, country = %code, "Country unassign rejected: {message}");
        if let Some(session) = session {
            state
                .sessions()
                .update(session, &id, |page| page.set_notice(message))
                .await;
        }
    } else if let Some(summary) = result.data {
        tracing::info!(zone_id = %id, country = %code, "Country unassigned");
        apply_countries(&state, &id, session, summary.countries).await;
    }

    Ok(Redirect::to(&zone_url(&id, session)).into_response())
}

async fn apply_countries(
    state: &AppState,
    id: &ShippingZoneId,
    session: Option<Uuid>,
    countries: Vec<Country>,
) {
    if let Some(session) = session {
        state
            .sessions()
            .update(session, id, |page| page.set_countries(countries))
            .await;
    }
}

async fn assign_response(
    state: &AppState,
    zone: &ZoneRecord,
    session: Option<Uuid>,
    error_message: Option<String>,
) -> Result<Response, AppError> {
    let shop = state.saleor().shop_countries().await?;
    let path = zone_path(&zone.id);

    Ok(CountriesAssignTemplate {
        current_path: "/shipping".to_string(),
        error_message,
        zone_name: zone.name.clone(),
        action: format!("{path}/countries/assign"),
        back_href: zone_url(&zone.id, session),
        session: session.map(|s| s.to_string()).unwrap_or_default(),
        countries: country_options(&shop, zone),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn country(code: &str, name: &str) -> Country {
        Country {
            code: CountryCode::parse(code).unwrap(),
            country: name.to_string(),
        }
    }

    #[test]
    fn test_country_options_tick_assigned_countries() {
        let zone = ZoneRecord {
            id: "z1".into(),
            name: "EU".to_string(),
            default: false,
            countries: vec![country("DE", "Germany")],
            shipping_methods: vec![],
            warehouses: vec![],
        };
        let shop = vec![country("DE", "Germany"), country("FR", "France")];

        let options = country_options(&shop, &zone);
        assert_eq!(options.len(), 2);
        assert!(options[0].checked);
        assert!(!options[1].checked);
        assert_eq!(options[1].code, "FR");
    }

    #[test]
    fn test_assign_page_renders_checkboxes() {
        let html = CountriesAssignTemplate {
            current_path: "/shipping".to_string(),
            error_message: None,
            zone_name: "EU".to_string(),
            action: "/shipping/z1/countries/assign".to_string(),
            back_href: "/shipping/z1".to_string(),
            session: String::new(),
            countries: vec![CountryOption {
                code: "DE".to_string(),
                name: "Germany".to_string(),
                checked: true,
            }],
        }
        .render()
        .unwrap();

        assert!(html.contains("name=\"countries\""));
        assert!(html.contains("checked"));
        assert!(html.contains("Germany"));
    }
}
