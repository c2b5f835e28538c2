//! Shipping rate create, edit and delete.
//!
//! Rate mutations answer with the refreshed zone, which replaces the zone in
//! the edit session. Deletes answer with errors only; on success the deleted
//! ids are dropped from the session's zone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use harbor_core::{ShippingMethodId, ShippingZoneId};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::{SessionQuery, current_zone, errors_message, parse_session, zone_path, zone_url};
use crate::error::AppError;
use crate::filters;
use crate::forms::FieldErrors;
use crate::pages::ZoneDetailsPage;
use crate::routes::{form_value, form_values};
use crate::saleor::{
    MutationResult, RateRecord, ShippingMethodType, ShippingPriceInput, UserError, ZoneRecord,
};
use crate::state::AppState;

/// Rate form fields, named as the API names them.
const RATE_FIELDS: [&str; 6] = [
    "name",
    "price",
    "minimumOrderPrice",
    "maximumOrderPrice",
    "minimumOrderWeight",
    "maximumOrderWeight",
];

// =============================================================================
// Form
// =============================================================================

/// Posted rate form. Numbers arrive as text and are parsed on submit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateForm {
    pub name: String,
    pub price: String,
    pub minimum_order_price: String,
    pub maximum_order_price: String,
    pub minimum_order_weight: String,
    pub maximum_order_weight: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub session: String,
}

impl RateForm {
    /// Seed the form from an existing rate.
    #[must_use]
    pub fn from_rate(rate: &RateRecord) -> Self {
        let amount = |money: Option<&harbor_core::Money>| {
            money.map(|m| m.amount.to_string()).unwrap_or_default()
        };
        let weight = |weight: Option<&harbor_core::Weight>| {
            weight.map(|w| w.value.to_string()).unwrap_or_default()
        };

        Self {
            name: rate.name.clone(),
            price: amount(rate.price.as_ref()),
            minimum_order_price: amount(rate.minimum_order_price.as_ref()),
            maximum_order_price: amount(rate.maximum_order_price.as_ref()),
            minimum_order_weight: weight(rate.minimum_order_weight.as_ref()),
            maximum_order_weight: weight(rate.maximum_order_weight.as_ref()),
            method_type: rate.method_type.slug().to_string(),
            session: String::new(),
        }
    }

    /// Rate variant named by the hidden `type` field.
    #[must_use]
    pub fn variant(&self) -> Option<ShippingMethodType> {
        ShippingMethodType::from_slug(&self.method_type)
    }

    /// Build the mutation input; number fields that don't parse become
    /// field errors.
    ///
    /// # Errors
    ///
    /// Returns the field errors when any number field is malformed.
    pub fn to_input(&self, variant: ShippingMethodType) -> Result<ShippingPriceInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let mut input = ShippingPriceInput {
            name: Some(self.name.trim().to_string()),
            price: parse_decimal(&self.price, "price", &mut errors),
            method_type: Some(variant),
            ..ShippingPriceInput::default()
        };

        match variant {
            ShippingMethodType::Price => {
                input.minimum_order_price =
                    parse_decimal(&self.minimum_order_price, "minimumOrderPrice", &mut errors);
                input.maximum_order_price =
                    parse_decimal(&self.maximum_order_price, "maximumOrderPrice", &mut errors);
            }
            ShippingMethodType::Weight => {
                input.minimum_order_weight =
                    parse_weight(&self.minimum_order_weight, "minimumOrderWeight", &mut errors);
                input.maximum_order_weight =
                    parse_weight(&self.maximum_order_weight, "maximumOrderWeight", &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }
}

fn parse_decimal(value: &str, field: &str, errors: &mut FieldErrors) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<Decimal>() {
        Ok(amount) if amount.is_sign_negative() => {
            errors.insert(field, "Must be zero or more");
            None
        }
        Ok(amount) => Some(amount),
        Err(_) => {
            errors.insert(field, "Enter a valid amount");
            None
        }
    }
}

fn parse_weight(value: &str, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Some(weight),
        _ => {
            errors.insert(field, "Enter a valid weight");
            None
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// Rate create/edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/rate_form.html")]
pub struct RateFormTemplate {
    pub current_path: String,
    pub error_message: Option<String>,
    pub title: String,
    pub zone_name: String,
    pub action: String,
    pub back_href: String,
    pub session: String,
    pub is_weight: bool,
    pub form: RateForm,
    pub errors: FieldErrors,
}

impl RateFormTemplate {
    fn new(
        zone: &ZoneRecord,
        rate: Option<&ShippingMethodId>,
        session: Option<Uuid>,
        form: RateForm,
    ) -> Self {
        let path = zone_path(&zone.id);
        let is_weight = form.variant() == Some(ShippingMethodType::Weight);
        let kind = if is_weight { "weight" } else { "price" };

        let (title, action) = match rate {
            Some(rate) => (
                format!("Edit {kind} rate"),
                format!("{path}/rates/{}", urlencoding::encode(rate.as_str())),
            ),
            None => (format!("Create {kind} rate"), format!("{path}/rates")),
        };

        Self {
            current_path: "/shipping".to_string(),
            error_message: None,
            title,
            zone_name: zone.name.clone(),
            action,
            back_href: zone_url(&zone.id, session),
            session: session.map(|s| s.to_string()).unwrap_or_default(),
            is_weight,
            form,
            errors: FieldErrors::new(),
        }
    }

    fn with_errors(mut self, errors: FieldErrors, error_message: Option<String>) -> Self {
        self.errors = errors;
        self.error_message = error_message;
        self
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Query for the new-rate page.
#[derive(Debug, Deserialize)]
pub struct NewRateQuery {
    #[serde(rename = "type")]
    pub method_type: String,
    pub session: Option<Uuid>,
}

/// New rate form.
///
/// # Errors
///
/// Returns 400 for an unknown rate type, 404 when the zone doesn't exist.
#[instrument(skip(state))]
pub async fn new_rate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<NewRateQuery>,
) -> Result<Response, AppError> {
    let variant = ShippingMethodType::from_slug(&query.method_type)
        .ok_or_else(|| AppError::BadRequest(format!("unknown rate type: {}", query.method_type)))?;
    let zone = current_zone(&state, &ShippingZoneId::new(id), query.session).await?;

    let form = RateForm {
        method_type: variant.slug().to_string(),
        ..RateForm::default()
    };
    Ok(RateFormTemplate::new(&zone, None, query.session, form).into_response())
}

/// Create a rate.
///
/// # Errors
///
/// Returns 400 for an unknown rate type, 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RateForm>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let session = parse_session(Some(&form.session));
    let variant = form
        .variant()
        .ok_or_else(|| AppError::BadRequest(format!("unknown rate type: {}", form.method_type)))?;

    let mut input = match form.to_input(variant) {
        Ok(input) => input,
        Err(errors) => {
            let zone = current_zone(&state, &id, session).await?;
            return Ok(RateFormTemplate::new(&zone, None, session, form)
                .with_errors(errors, None)
                .into_response());
        }
    };
    input.shipping_zone = Some(id.clone());

    let result = state.saleor().create_shipping_rate(input).await?;
    finish_rate_mutation(&state, &id, None, session, form, result).await
}

/// Edit rate form.
///
/// # Errors
///
/// Returns 404 when the zone or rate doesn't exist.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path((id, rate)): Path<(String, String)>,
    Query(query): Query<SessionQuery>,
) -> Result<Response, AppError> {
    let rate_id = ShippingMethodId::new(rate);
    let zone = current_zone(&state, &ShippingZoneId::new(id), query.session).await?;
    let rate = zone
        .shipping_methods
        .iter()
        .find(|r| r.id == rate_id)
        .ok_or_else(|| AppError::NotFound(format!("shipping rate {rate_id}")))?;

    let form = RateForm::from_rate(rate);
    Ok(RateFormTemplate::new(&zone, Some(&rate_id), query.session, form).into_response())
}

/// Update a rate.
///
/// # Errors
///
/// Returns 400 for an unknown rate type, 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path((id, rate)): Path<(String, String)>,
    Form(form): Form<RateForm>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let rate_id = ShippingMethodId::new(rate);
    let session = parse_session(Some(&form.session));
    let variant = form
        .variant()
        .ok_or_else(|| AppError::BadRequest(format!("unknown rate type: {}", form.method_type)))?;

    let mut input = match form.to_input(variant) {
        Ok(input) => input,
        Err(errors) => {
            let zone = current_zone(&state, &id, session).await?;
            return Ok(RateFormTemplate::new(&zone, Some(&rate_id), session, form)
                .with_errors(errors, None)
                .into_response());
        }
    };
    input.shipping_zone = Some(id.clone());

    let result = state.saleor().update_shipping_rate(&rate_id, input).await?;
    finish_rate_mutation(&state, &id, Some(&rate_id), session, form, result).await
}

/// Delete one rate.
///
/// # Errors
///
/// Returns 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn delete(
    State(state): State<AppState>,
    Path((id, rate)): Path<(String, String)>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let rate_id = ShippingMethodId::new(rate);
    let session = parse_session(form_value(&form, "session"));

    let errors = state.saleor().delete_shipping_rate(&rate_id).await?;
    if errors.is_empty() {
        tracing::info!(zone_id = %id, rate_id = %rate_id, "Shipping rate deleted");
    }
    apply_deletion(&state, &id, session, vec![rate_id], errors).await;
    Ok(Redirect::to(&zone_url(&id, session)).into_response())
}

/// Delete the selected rates.
///
/// # Errors
///
/// Returns 502 when the API is unreachable.
#[instrument(skip(state, form))]
pub async fn bulk_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let session = parse_session(form_value(&form, "session"));
    let ids: Vec<ShippingMethodId> = form_values(&form, "ids")
        .into_iter()
        .map(ShippingMethodId::new)
        .collect();

    if !ids.is_empty() {
        let errors = state.saleor().bulk_delete_shipping_rates(ids.clone()).await?;
        if errors.is_empty() {
            tracing::info!(zone_id = %id, count = ids.len(), "Shipping rates deleted");
        }
        apply_deletion(&state, &id, session, ids, errors).await;
    }
    Ok(Redirect::to(&zone_url(&id, session)).into_response())
}

// =============================================================================
// Helpers
// =============================================================================

/// Re-render the form on errors; otherwise replace the session's zone and go
/// back to the details page.
async fn finish_rate_mutation(
    state: &AppState,
    id: &ShippingZoneId,
    rate: Option<&ShippingMethodId>,
    session: Option<Uuid>,
    form: RateForm,
    result: MutationResult<ZoneRecord>,
) -> Result<Response, AppError> {
    if !result.is_success() {
        let errors = FieldErrors::collect(&result.errors, &RATE_FIELDS);
        let unmatched = errors.is_empty().then(|| errors_message(&result.errors));
        let zone = current_zone(state, id, session).await?;
        return Ok(RateFormTemplate::new(&zone, rate, session, form)
            .with_errors(errors, unmatched)
            .into_response());
    }

    match (result.data, session) {
        (Some(zone), Some(session)) => {
            tracing::info!(zone_id = %id, "Shipping rate saved");
            state
                .sessions()
                .update(session, id, |page| page.replace_zone(zone))
                .await;
        }
        (Some(_), None) => tracing::info!(zone_id = %id, "Shipping rate saved"),
        (None, _) => tracing::warn!(zone_id = %id, "Rate mutation returned no zone"),
    }
    Ok(Redirect::to(&zone_url(id, session)).into_response())
}

async fn apply_deletion(
    state: &AppState,
    id: &ShippingZoneId,
    session: Option<Uuid>,
    ids: Vec<ShippingMethodId>,
    errors: Vec<UserError>,
) {
    if let Some(session) = session {
        state
            .sessions()
            .update(session, id, |page| apply_rate_deletion(page, &ids, &errors))
            .await;
    }
}

/// Outcome of a rate delete: with no errors the rates leave the zone,
/// otherwise the page shows what went wrong.
fn apply_rate_deletion(page: &mut ZoneDetailsPage, ids: &[ShippingMethodId], errors: &[UserError]) {
    if errors.is_empty() {
        page.remove_rates(ids);
    } else {
        tracing::warn!(count = errors.len(), "Rate delete rejected");
        page.set_notice(errors_message(errors));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::saleor::WarehouseRef;

    fn rate(id: &str, method_type: ShippingMethodType) -> RateRecord {
        RateRecord {
            id: id.into(),
            name: id.to_uppercase(),
            method_type,
            price: Some(harbor_core::Money::new(Decimal::new(500, 2), "EUR")),
            minimum_order_price: None,
            maximum_order_price: None,
            minimum_order_weight: None,
            maximum_order_weight: None,
        }
    }

    fn page() -> ZoneDetailsPage {
        ZoneDetailsPage::mount(ZoneRecord {
            id: "z1".into(),
            name: "EU".to_string(),
            default: false,
            countries: vec![],
            shipping_methods: vec![
                rate("r1", ShippingMethodType::Price),
                rate("r2", ShippingMethodType::Weight),
            ],
            warehouses: vec![WarehouseRef {
                id: "w1".into(),
                name: "Berlin".to_string(),
            }],
        })
    }

    #[test]
    fn test_successful_delete_removes_rate_from_zone() {
        let mut page = page();
        apply_rate_deletion(&mut page, &["r1".into()], &[]);

        let ids: Vec<&str> = page
            .zone()
            .shipping_methods
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r2"]);
        assert_eq!(page.notice(), None);
    }

    #[test]
    fn test_rejected_delete_keeps_rate_and_shows_notice() {
        let mut page = page();
        let errors = vec![UserError {
            field: None,
            message: Some("Rate is in use".to_string()),
        }];
        apply_rate_deletion(&mut page, &["r1".into()], &errors);

        assert_eq!(page.zone().shipping_methods.len(), 2);
        assert_eq!(page.notice(), Some("Rate is in use"));
    }

    #[test]
    fn test_price_rate_input() {
        let form = RateForm {
            name: " Standard ".to_string(),
            price: "5.50".to_string(),
            minimum_order_price: "10".to_string(),
            minimum_order_weight: "ignored".to_string(),
            method_type: "price".to_string(),
            ..RateForm::default()
        };
        let input = form.to_input(ShippingMethodType::Price).unwrap();

        assert_eq!(input.name.as_deref(), Some("Standard"));
        assert_eq!(input.price, Some(Decimal::new(550, 2)));
        assert_eq!(input.minimum_order_price, Some(Decimal::new(10, 0)));
        assert_eq!(input.maximum_order_price, None);
        assert_eq!(input.minimum_order_weight, None);
        assert_eq!(input.method_type, Some(ShippingMethodType::Price));
    }

    #[test]
    fn test_malformed_numbers_become_field_errors() {
        let form = RateForm {
            name: "Heavy".to_string(),
            price: "abc".to_string(),
            minimum_order_weight: "-1".to_string(),
            method_type: "weight".to_string(),
            ..RateForm::default()
        };
        let errors = form.to_input(ShippingMethodType::Weight).unwrap_err();

        assert_eq!(errors.get("price"), Some("Enter a valid amount"));
        assert_eq!(errors.get("minimumOrderWeight"), Some("Enter a valid weight"));
        assert_eq!(errors.get("maximumOrderWeight"), None);
    }

    #[test]
    fn test_form_seeds_from_rate() {
        let form = RateForm::from_rate(&rate("r1", ShippingMethodType::Price));
        assert_eq!(form.name, "R1");
        assert_eq!(form.price, "5.00");
        assert_eq!(form.variant(), Some(ShippingMethodType::Price));
    }

    #[test]
    fn test_form_template_renders_variant_fields() {
        let zone = page().zone().clone();
        let form = RateForm {
            method_type: "weight".to_string(),
            ..RateForm::default()
        };
        let mut errors = FieldErrors::new();
        errors.insert("price", "This field is required");

        let html = RateFormTemplate::new(&zone, None, None, form)
            .with_errors(errors, None)
            .render()
            .unwrap();
        assert!(html.contains("Create weight rate"));
        assert!(html.contains("name=\"minimumOrderWeight\""));
        assert!(!html.contains("name=\"minimumOrderPrice\""));
        assert!(html.contains("This field is required"));
    }
}
