//! Zone details page: mount or resume, field events, warehouse search and save.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use harbor_core::{ShippingZoneId, WarehouseId};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::{SessionQuery, is_htmx, session_expired, session_path, zone_path};
use crate::components::{AssignmentList, ChoiceAdd, ChoiceListField, RateList, SaveBar};
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, ZoneField};
use crate::pages::ZoneDetailsPage;
use crate::routes::render;
use crate::saleor::{
    FieldScoped, SaleorError, ShippingMethodType, ShippingZoneInput, WarehouseError, WarehouseRef,
};
use crate::state::AppState;

const SAVED_NOTICE: &str = "Saved changes";
const SAVE_FAILED_NOTICE: &str = "Could not save the shipping zone. Please try again.";
const WAREHOUSES_FAILED_NOTICE: &str = "Could not load warehouses. Please try again.";

// =============================================================================
// Views
// =============================================================================

/// Everything inside `#zone-page`; HTMX responses swap this whole block.
#[derive(Debug, Clone, Template)]
#[template(path = "shipping/_zone_page.html")]
pub struct ZonePageView {
    pub title: String,
    pub zone_path: String,
    pub session: String,
    pub notice: Option<String>,
    pub name: String,
    pub name_error: Option<String>,
    /// HTMX POST target for generic field changes.
    pub change_action: String,
    pub countries: AssignmentList,
    pub price_rates: RateList,
    pub weight_rates: RateList,
    pub warehouse: ChoiceListField,
    pub save_bar: SaveBar,
}

impl ZonePageView {
    /// Render state for `page` under edit session `session`.
    #[must_use]
    pub fn new(page: &ZoneDetailsPage, session: Uuid) -> Self {
        let zone = page.zone();
        let form = page.form();
        let search = page.warehouse_search();
        let errors = page.errors();

        let zone_path = zone_path(&zone.id);
        let session_path = session_path(&zone.id, session);
        let session = session.to_string();
        let disabled = false;

        let mut warehouse = ChoiceListField::new(
            ZoneField::Warehouse.name(),
            "Warehouse",
            page.warehouse_choices(),
        );
        warehouse.value.clone_from(&form.data().warehouse);
        warehouse.display_value = form.warehouse_display().label().to_string();
        warehouse.has_more = search.has_more();
        warehouse.loading = search.is_loading();
        warehouse.error = errors.get(ZoneField::Warehouse.name()).map(String::from);
        warehouse.add = Some(ChoiceAdd {
            label: "Add new warehouse".to_string(),
            href: format!(
                "/warehouses/new?zone={}&session={session}",
                urlencoding::encode(zone.id.as_str())
            ),
        });
        warehouse.fetch_url = Some(format!("{session_path}/warehouses"));
        warehouse.change_url = Some(format!("{session_path}/warehouse"));
        warehouse.target = "#zone-page".to_string();
        warehouse.disabled = disabled;

        Self {
            title: zone.name.clone(),
            notice: page.notice().map(String::from),
            name: form.data().name.clone(),
            name_error: errors.get(ZoneField::Name.name()).map(String::from),
            change_action: format!("{session_path}/change"),
            countries: AssignmentList::for_zone(Some(zone), &zone_path, &session, disabled),
            price_rates: RateList::new(
                &zone.shipping_methods,
                ShippingMethodType::Price,
                &zone_path,
                &session,
                disabled,
            ),
            weight_rates: RateList::new(
                &zone.shipping_methods,
                ShippingMethodType::Weight,
                &zone_path,
                &session,
                disabled,
            ),
            warehouse,
            save_bar: save_bar(page, &session_path, &zone_path, &session),
            zone_path,
            session,
        }
    }
}

fn save_bar(page: &ZoneDetailsPage, session_path: &str, zone_path: &str, session: &str) -> SaveBar {
    SaveBar::new(
        session_path,
        Some(format!("{zone_path}/delete?session={session}")),
        page.form().can_save(false),
        false,
    )
}

/// Zone details page template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/details.html")]
pub struct ZoneDetailsTemplate {
    pub current_path: String,
    pub view: ZonePageView,
}

// =============================================================================
// Forms
// =============================================================================

/// Generic field change posted by the name input.
#[derive(Debug, Deserialize)]
pub struct ChangeForm {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// Warehouse pick.
#[derive(Debug, Deserialize)]
pub struct WarehouseForm {
    #[serde(default)]
    pub value: String,
}

/// Warehouse search or "load more".
#[derive(Debug, Default, Deserialize)]
pub struct WarehouseSearchQuery {
    pub query: Option<String>,
    #[serde(default)]
    pub more: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Zone details page.
///
/// Resumes the edit session named in `?session=` when it is still alive,
/// otherwise fetches the zone and mounts a fresh page.
///
/// # Errors
///
/// Returns 404 when the zone doesn't exist, 502 when the API is unreachable.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);

    if let Some(session) = query.session
        && let Some(mut page) = state.sessions().get(session, &id).await
    {
        let response = details_response(&page, session);
        if page.notice().is_some() {
            page.clear_notice();
            state.sessions().save(session, page).await;
        }
        return Ok(response);
    }

    let zone = state.saleor().shipping_zone(&id).await?;
    let mut page = ZoneDetailsPage::mount(zone);

    // The first page of warehouses is appended after the assigned one.
    match state
        .saleor()
        .search_warehouses("", state.config().warehouse_page_size, None)
        .await
    {
        Ok(results) => page.warehouse_search_mut().finish(results),
        Err(e) => {
            tracing::error!(zone_id = %id, "Failed to load warehouses: {e}");
            page.set_notice(WAREHOUSES_FAILED_NOTICE);
        }
    }

    let session = state.sessions().open(page.clone()).await;
    let response = details_response(&page, session);
    if page.notice().is_some() {
        page.clear_notice();
        state.sessions().save(session, page).await;
    }
    Ok(response)
}

/// Apply a generic field change.
///
/// Only the save bar depends on it, so only the save bar is returned.
///
/// # Errors
///
/// Returns 400 for a field the zone form doesn't have.
#[instrument(skip(state, headers, form), fields(field = %form.field))]
pub async fn change(
    State(state): State<AppState>,
    Path((id, session)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Form(form): Form<ChangeForm>,
) -> Result<Response, AppError> {
    let id = ShippingZoneId::new(id);
    let field: ZoneField = form
        .field
        .parse()
        .map_err(|e: crate::forms::UnknownZoneField| AppError::BadRequest(e.to_string()))?;

    let Some(mut page) = state.sessions().get(session, &id).await else {
        return Ok(session_expired(&id, &headers));
    };

    match field {
        ZoneField::Warehouse => page.change_warehouse(form.value),
        ZoneField::Name => page.form_mut().change(field, form.value),
    }

    let bar = save_bar(
        &page,
        &session_path(&id, session),
        &zone_path(&id),
        &session.to_string(),
    );
    state.sessions().save(session, page).await;
    Ok(render(&bar))
}

/// Pick a warehouse from the loaded choices.
#[instrument(skip(state, headers))]
pub async fn change_warehouse(
    State(state): State<AppState>,
    Path((id, session)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Form(form): Form<WarehouseForm>,
) -> Response {
    let id = ShippingZoneId::new(id);
    let Some(mut page) = state.sessions().get(session, &id).await else {
        return session_expired(&id, &headers);
    };

    page.clear_notice();
    page.change_warehouse(form.value);

    let response = page_response(&page, session);
    state.sessions().save(session, page).await;
    response
}

/// Start a warehouse search or load the next page of results.
///
/// A "load more" arriving while the previous one is still in flight is
/// ignored.
#[instrument(skip(state, headers))]
pub async fn search_warehouses(
    State(state): State<AppState>,
    Path((id, session)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Query(query): Query<WarehouseSearchQuery>,
) -> Response {
    let id = ShippingZoneId::new(id);
    let Some(mut page) = state.sessions().get(session, &id).await else {
        return session_expired(&id, &headers);
    };
    page.clear_notice();

    let search = page.warehouse_search_mut();
    let request = if query.more {
        search
            .begin_fetch_more()
            .map(|after| (search.query().to_string(), after))
    } else {
        let text = query.query.unwrap_or_default();
        search.begin_search(text.trim());
        Some((search.query().to_string(), None))
    };

    let Some((text, after)) = request else {
        tracing::debug!(session = %session, "Ignoring warehouse fetch while loading");
        return page_response(&page, session);
    };

    // Record the loading flag before the request goes out.
    state.sessions().save(session, page.clone()).await;

    match state
        .saleor()
        .search_warehouses(&text, state.config().warehouse_page_size, after)
        .await
    {
        Ok(results) => page.warehouse_search_mut().finish(results),
        Err(e) => {
            tracing::error!(zone_id = %id, "Failed to search warehouses: {e}");
            page.warehouse_search_mut().fail();
            page.set_notice(WAREHOUSES_FAILED_NOTICE);
        }
    }

    let response = page_response(&page, session);
    state.sessions().save(session, page).await;
    response
}

/// Save the zone name and warehouse.
///
/// The name goes through `UpdateShippingZone`. A changed warehouse is then
/// unassigned from the zone and the new one assigned. Mutation errors land
/// under their fields; transport failures become a page notice.
#[instrument(skip(state, headers))]
pub async fn submit(
    State(state): State<AppState>,
    Path((id, session)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    let id = ShippingZoneId::new(id);
    let Some(mut page) = state.sessions().get(session, &id).await else {
        return session_expired(&id, &headers);
    };
    page.clear_notice();

    let Some(data) = page.form().submit(false, |data| data) else {
        tracing::debug!(zone_id = %id, "Save ignored: nothing changed");
        return page_response(&page, session);
    };

    let input = ShippingZoneInput {
        name: Some(data.name.clone()),
        ..ShippingZoneInput::default()
    };

    match state.saleor().update_shipping_zone(&id, input).await {
        Err(e) => {
            tracing::error!(zone_id = %id, "Failed to update shipping zone: {e}");
            page.set_notice(SAVE_FAILED_NOTICE);
        }
        Ok(result) if !result.is_success() => {
            page.set_errors(FieldErrors::collect(&result.errors, &ZoneField::NAMES));
        }
        Ok(result) => {
            if let Some(summary) = result.data {
                page.apply_zone_summary(summary);
            }
            match save_warehouse(&state, &mut page, data.warehouse_id()).await {
                Ok(errors) if errors.is_empty() => {
                    tracing::info!(zone_id = %id, "Shipping zone saved");
                    page.set_errors(errors);
                    page.set_notice(SAVED_NOTICE);
                }
                Ok(errors) => page.set_errors(errors),
                Err(e) => {
                    tracing::error!(zone_id = %id, "Failed to update zone warehouse: {e}");
                    page.set_notice(SAVE_FAILED_NOTICE);
                }
            }
        }
    }

    let response = page_response(&page, session);
    state.sessions().save(session, page).await;
    response
}

/// Discard the edit form and go back to the zone list.
#[instrument(skip(state, headers))]
pub async fn cancel(
    State(state): State<AppState>,
    Path((id, session)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    state.sessions().discard(session).await;
    tracing::debug!(zone_id = %id, session = %session, "Edit session discarded");

    if is_htmx(&headers) {
        [("HX-Redirect", "/shipping")].into_response()
    } else {
        Redirect::to("/shipping").into_response()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn page_response(page: &ZoneDetailsPage, session: Uuid) -> Response {
    render(&ZonePageView::new(page, session))
}

fn details_response(page: &ZoneDetailsPage, session: Uuid) -> Response {
    ZoneDetailsTemplate {
        current_path: "/shipping".to_string(),
        view: ZonePageView::new(page, session),
    }
    .into_response()
}

/// Move the zone to the selected warehouse: unassign the current one, then
/// assign the new one. Returns the warehouse errors keyed under the
/// warehouse field.
///
/// The page drops the old warehouse as soon as the unassign succeeds, so a
/// failed assign leaves it matching the API and a retry only assigns.
async fn save_warehouse(
    state: &AppState,
    page: &mut ZoneDetailsPage,
    selected: Option<WarehouseId>,
) -> Result<FieldErrors, SaleorError> {
    let zone_id = page.zone().id.clone();
    let current = page.zone().primary_warehouse().map(|w| w.id.clone());
    if current == selected {
        return Ok(FieldErrors::new());
    }
    let selected_label = page.form().warehouse_display().label().to_string();

    if let Some(current) = &current {
        let errors = state.saleor().unassign_warehouse(current, &zone_id).await?;
        if !errors.is_empty() {
            return Ok(warehouse_errors(&errors));
        }
        page.set_warehouse(None);
    }

    let Some(warehouse_id) = selected else {
        return Ok(FieldErrors::new());
    };
    let errors = state
        .saleor()
        .assign_warehouse(&warehouse_id, &zone_id)
        .await?;
    if !errors.is_empty() {
        return Ok(warehouse_errors(&errors));
    }

    page.set_warehouse(Some(WarehouseRef {
        id: warehouse_id,
        name: selected_label,
    }));
    Ok(FieldErrors::new())
}

/// `warehouseErrors` name API fields (`warehouseId`, `shippingZoneId`) that
/// the page doesn't render, so they all go under the warehouse field.
fn warehouse_errors(errors: &[WarehouseError]) -> FieldErrors {
    let mut field_errors = FieldErrors::new();
    if let Some(first) = errors.first() {
        field_errors.insert(ZoneField::Warehouse.name(), first.message());
    }
    if errors.len() > 1 {
        tracing::warn!(count = errors.len(), "Showing only the first warehouse error");
    }
    field_errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::saleor::{RateRecord, WarehouseErrorCode, ZoneRecord};
    use harbor_core::{Country, CountryCode, Money};
    use rust_decimal::Decimal;

    fn eu_zone() -> ZoneRecord {
        ZoneRecord {
            id: "z1".into(),
            name: "EU".to_string(),
            default: false,
            countries: vec![Country {
                code: CountryCode::parse("DE").unwrap(),
                country: "Germany".to_string(),
            }],
            shipping_methods: vec![RateRecord {
                id: "r1".into(),
                name: "Standard".to_string(),
                method_type: ShippingMethodType::Price,
                price: Some(Money::new(Decimal::new(500, 2), "EUR")),
                minimum_order_price: None,
                maximum_order_price: None,
                minimum_order_weight: None,
                maximum_order_weight: None,
            }],
            warehouses: vec![WarehouseRef {
                id: "w1".into(),
                name: "Berlin".to_string(),
            }],
        }
    }

    #[test]
    fn test_eu_zone_renders_every_section() {
        let page = ZoneDetailsPage::mount(eu_zone());
        let view = ZonePageView::new(&page, Uuid::nil());

        assert_eq!(view.price_rates.ids(), vec!["r1"]);
        assert!(view.weight_rates.ids().is_empty());
        assert_eq!(view.countries.countries[0].code, "DE");
        assert_eq!(view.warehouse.display_value, "Berlin");
        assert_eq!(view.warehouse.value, "w1");
        assert!(view.save_bar.save_disabled);

        let html = view.render().unwrap();
        assert!(html.contains("id=\"zone-page\""));
        assert!(html.contains("Germany"));
        assert!(html.contains("Standard"));
        assert!(html.contains("Berlin"));
    }

    #[test]
    fn test_default_zone_without_countries_renders_placeholder() {
        let mut zone = eu_zone();
        zone.default = true;
        zone.countries.clear();

        let html = ZonePageView::new(&ZoneDetailsPage::mount(zone), Uuid::nil())
            .render()
            .unwrap();
        assert!(html.contains("covers all of the countries"));
    }

    #[test]
    fn test_field_errors_render_under_their_fields() {
        let mut page = ZoneDetailsPage::mount(eu_zone());
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is taken");
        errors.insert("warehouse", "Not found");
        page.set_errors(errors);

        let view = ZonePageView::new(&page, Uuid::nil());
        assert_eq!(view.name_error.as_deref(), Some("Name is taken"));
        assert_eq!(view.warehouse.error.as_deref(), Some("Not found"));
    }

    #[test]
    fn test_change_enables_save() {
        let mut page = ZoneDetailsPage::mount(eu_zone());
        page.form_mut().change(ZoneField::Name, "Europe");

        let view = ZonePageView::new(&page, Uuid::nil());
        assert!(!view.save_bar.save_disabled);
        assert_eq!(view.name, "Europe");
        assert_eq!(view.title, "EU");
    }

    #[test]
    fn test_warehouse_errors_go_under_warehouse_field() {
        let errors = warehouse_errors(&[
            WarehouseError {
                code: WarehouseErrorCode::NotFound,
                field: Some("warehouseId".to_string()),
            },
            WarehouseError {
                code: WarehouseErrorCode::Invalid,
                field: None,
            },
        ]);
        assert_eq!(errors.get("warehouse"), Some("Not found"));
        assert!(warehouse_errors(&[]).is_empty());
    }
}
