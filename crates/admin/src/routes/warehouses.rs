//! Warehouse creation.
//!
//! Reached from the zone page's warehouse field. The created warehouse goes
//! back into that page's choices as the selected value; it is only assigned
//! to the zone when the zone is saved.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use harbor_core::{AddressField, AddressRecord, ShippingZoneId};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::components::AddressFieldSet;
use crate::error::AppError;
use crate::filters;
use crate::forms::FieldErrors;
use crate::routes::form_value;
use crate::routes::shipping::{errors_message, zone_url};
use crate::saleor::{WarehouseCreateInput, WarehouseError};
use crate::state::AppState;

/// Build the warehouses router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/warehouses/new", get(new_warehouse))
        .route("/warehouses", post(create))
}

/// Zone page the form was opened from.
#[derive(Debug, Default, Deserialize)]
pub struct OriginQuery {
    pub zone: Option<String>,
    pub session: Option<Uuid>,
}

/// Warehouse create page template.
#[derive(Template, WebTemplate)]
#[template(path = "warehouses/new.html")]
pub struct WarehouseFormTemplate {
    pub current_path: String,
    pub error_message: Option<String>,
    pub name: String,
    pub name_error: Option<String>,
    pub email: String,
    pub email_error: Option<String>,
    pub address: AddressFieldSet,
    pub zone: String,
    pub session: String,
    pub back_href: String,
}

/// Posted warehouse form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WarehouseForm {
    name: String,
    email: String,
    address: AddressRecord,
    zone: Option<ShippingZoneId>,
    session: Option<Uuid>,
}

impl WarehouseForm {
    /// Collect the known fields from raw form pairs; unknown keys are ignored.
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut address = AddressRecord::default();
        for (key, value) in pairs {
            if let Ok(field) = key.parse::<AddressField>() {
                AddressFieldSet::change(&mut address, field, value.trim());
            }
        }

        Self {
            name: form_value(pairs, "name").unwrap_or_default().trim().to_string(),
            email: form_value(pairs, "email").unwrap_or_default().trim().to_string(),
            address,
            zone: form_value(pairs, "zone")
                .filter(|z| !z.is_empty())
                .map(ShippingZoneId::new),
            session: form_value(pairs, "session").and_then(|s| Uuid::parse_str(s).ok()),
        }
    }

    fn to_input(&self) -> WarehouseCreateInput {
        WarehouseCreateInput {
            name: self.name.clone(),
            company_name: self.address.company_name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

/// Every field the form renders, for keying `warehouseErrors`.
fn form_fields() -> Vec<&'static str> {
    let mut fields = vec!["name", "email"];
    fields.extend(AddressFieldSet::field_names());
    fields
}

/// Warehouse create form.
///
/// # Errors
///
/// Returns 502 if the shop's countries can't be loaded.
#[instrument(skip(state))]
pub async fn new_warehouse(
    State(state): State<AppState>,
    Query(query): Query<OriginQuery>,
) -> Result<Response, AppError> {
    let form = WarehouseForm {
        zone: query.zone.filter(|z| !z.is_empty()).map(ShippingZoneId::new),
        session: query.session,
        ..WarehouseForm::default()
    };
    form_page(&state, &form, &FieldErrors::new(), None).await
}

/// Create a warehouse and hand it back to the zone page.
///
/// # Errors
///
/// Returns 502 if the API request fails.
#[instrument(skip(state, pairs))]
pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = WarehouseForm::from_pairs(&pairs);
    let result = state.saleor().create_warehouse(form.to_input()).await?;

    if !result.is_success() {
        let (errors, unmatched) = sort_errors(&result.errors);
        return form_page(&state, &form, &errors, unmatched).await;
    }

    let warehouse = result
        .data
        .ok_or_else(|| AppError::Internal("warehouse create returned no warehouse".to_string()))?;
    tracing::info!(warehouse_id = %warehouse.id, name = %warehouse.name, "Warehouse created");

    match (form.zone, form.session) {
        (Some(zone), Some(session)) => {
            let offered = state
                .sessions()
                .update(session, &zone, |page| page.add_warehouse(warehouse))
                .await;
            if offered.is_none() {
                tracing::info!(zone_id = %zone, "Edit session expired before warehouse returned");
            }
            Ok(Redirect::to(&zone_url(&zone, Some(session))).into_response())
        }
        (Some(zone), None) => Ok(Redirect::to(&zone_url(&zone, None)).into_response()),
        (None, _) => Ok(Redirect::to("/shipping").into_response()),
    }
}

/// Field errors plus a page message for errors no field claims.
fn sort_errors(errors: &[WarehouseError]) -> (FieldErrors, Option<String>) {
    let field_errors = FieldErrors::collect(errors, &form_fields());
    let unmatched = field_errors.is_empty().then(|| errors_message(errors));
    (field_errors, unmatched)
}

async fn form_page(
    state: &AppState,
    form: &WarehouseForm,
    errors: &FieldErrors,
    error_message: Option<String>,
) -> Result<Response, AppError> {
    let countries = state.saleor().shop_countries().await?;
    let back_href = form
        .zone
        .as_ref()
        .map_or_else(|| "/shipping".to_string(), |zone| zone_url(zone, form.session));

    Ok(WarehouseFormTemplate {
        current_path: "/shipping".to_string(),
        error_message,
        name: form.name.clone(),
        name_error: errors.get("name").map(String::from),
        email: form.email.clone(),
        email_error: errors.get("email").map(String::from),
        address: AddressFieldSet::new(&form.address, errors, &countries, false),
        zone: form.zone.as_ref().map(ToString::to_string).unwrap_or_default(),
        session: form.session.map(|s| s.to_string()).unwrap_or_default(),
        back_href,
    }
    .into_response())
}
