//! Shipping zone, rate and warehouse operations.
//!
//! Every method issues exactly one request. Mutation payload errors come back
//! inside [`MutationResult`]; callers decide how to fold the result into the
//! zone they hold.

use harbor_core::{Country, ShippingMethodId, ShippingZoneId, WarehouseId, WeightUnit};
use tracing::instrument;

use super::client::require_payload;
use super::conversions::{
    convert_assign_warehouse, convert_bulk_delete_shipping_rate,
    convert_bulk_delete_shipping_zone, convert_create_shipping_rate, convert_create_shipping_zone,
    convert_create_warehouse, convert_default_weight_unit, convert_delete_shipping_rate,
    convert_delete_shipping_zone, convert_shipping_zone, convert_shipping_zones,
    convert_shop_countries, convert_unassign_warehouse, convert_update_shipping_rate,
    convert_update_shipping_zone, convert_warehouse_search, create_shipping_rate_input,
    create_shipping_zone_input, create_warehouse_input, update_shipping_rate_input,
    update_shipping_zone_input, weight_unit_input,
};
use super::queries::{
    AssignShippingZoneToWarehouse, BulkDeleteShippingRate, BulkDeleteShippingZone,
    CreateShippingRate, CreateShippingZone, CreateWarehouse, DeleteShippingRate,
    DeleteShippingZone, SearchWarehouses, ShippingZone, ShippingZones, ShopCountries,
    UnassignShippingZoneToWarehouse, UpdateDefaultWeightUnit, UpdateShippingRate,
    UpdateShippingZone, assign_shipping_zone_to_warehouse, bulk_delete_shipping_rate,
    bulk_delete_shipping_zone, create_shipping_rate, create_shipping_zone, create_warehouse,
    delete_shipping_rate, delete_shipping_zone, search_warehouses, shipping_zone, shipping_zones,
    shop_countries, unassign_shipping_zone_to_warehouse, update_default_weight_unit,
    update_shipping_rate, update_shipping_zone,
};
use super::types::{
    MutationResult, Page, ShippingPriceInput, ShippingZoneInput, UserError, WarehouseCreateInput,
    WarehouseError, WarehouseRef, ZoneRecord, ZoneSummary,
};
use super::{SaleorClient, SaleorError};

/// First page of the zone list plus the shop's default weight unit.
#[derive(Debug, Clone)]
pub struct ShippingZoneList {
    pub zones: Page<ZoneSummary>,
    pub default_weight_unit: Option<WeightUnit>,
}

impl SaleorClient {
    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetch a zone with its countries, rates and warehouses.
    ///
    /// # Errors
    ///
    /// Returns `SaleorError::NotFound` if the zone doesn't exist.
    #[instrument(skip(self), fields(zone_id = %id))]
    pub async fn shipping_zone(&self, id: &ShippingZoneId) -> Result<ZoneRecord, SaleorError> {
        let variables = shipping_zone::Variables { id: id.to_string() };
        let response = self.execute::<ShippingZone>(variables).await?;
        convert_shipping_zone(response)
            .ok_or_else(|| SaleorError::NotFound(format!("shipping zone {id}")))
    }

    /// Fetch a page of zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn shipping_zones(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<ShippingZoneList, SaleorError> {
        let variables = shipping_zones::Variables { first, after };
        let response = self.execute::<ShippingZones>(variables).await?;
        Ok(convert_shipping_zones(response))
    }

    /// Search warehouses by name, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_warehouses(
        &self,
        query: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<Page<WarehouseRef>, SaleorError> {
        let variables = search_warehouses::Variables {
            first,
            after,
            query: query.to_string(),
        };
        let response = self.execute::<SearchWarehouses>(variables).await?;
        Ok(convert_warehouse_search(response))
    }

    /// Countries the shop ships to.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn shop_countries(&self) -> Result<Vec<Country>, SaleorError> {
        let response = self
            .execute::<ShopCountries>(shop_countries::Variables)
            .await?;
        Ok(convert_shop_countries(response))
    }

    // =========================================================================
    // Zone mutations
    // =========================================================================

    /// Create a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are in the result.
    #[instrument(skip(self, input))]
    pub async fn create_shipping_zone(
        &self,
        input: ShippingZoneInput,
    ) -> Result<MutationResult<ZoneSummary>, SaleorError> {
        let variables = create_shipping_zone::Variables {
            input: create_shipping_zone_input(input),
        };
        let response = self.execute::<CreateShippingZone>(variables).await?;
        require_payload(convert_create_shipping_zone(response), "shippingZoneCreate")
    }

    /// Update a zone's name, countries or default flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are in the result.
    #[instrument(skip(self, input), fields(zone_id = %id))]
    pub async fn update_shipping_zone(
        &self,
        id: &ShippingZoneId,
        input: ShippingZoneInput,
    ) -> Result<MutationResult<ZoneSummary>, SaleorError> {
        let variables = update_shipping_zone::Variables {
            id: id.to_string(),
            input: update_shipping_zone_input(input),
        };
        let response = self.execute::<UpdateShippingZone>(variables).await?;
        require_payload(convert_update_shipping_zone(response), "shippingZoneUpdate")
    }

    /// Delete a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are returned as data.
    #[instrument(skip(self), fields(zone_id = %id))]
    pub async fn delete_shipping_zone(
        &self,
        id: &ShippingZoneId,
    ) -> Result<Vec<UserError>, SaleorError> {
        let variables = delete_shipping_zone::Variables { id: id.to_string() };
        let response = self.execute::<DeleteShippingZone>(variables).await?;
        require_payload(convert_delete_shipping_zone(response), "shippingZoneDelete")
    }

    /// Delete several zones at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are returned as data.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn bulk_delete_shipping_zones(
        &self,
        ids: Vec<ShippingZoneId>,
    ) -> Result<Vec<UserError>, SaleorError> {
        let variables = bulk_delete_shipping_zone::Variables {
            ids: ids.into_iter().map(ShippingZoneId::into_inner).collect(),
        };
        let response = self.execute::<BulkDeleteShippingZone>(variables).await?;
        require_payload(
            convert_bulk_delete_shipping_zone(response),
            "shippingZoneBulkDelete",
        )
    }

    // =========================================================================
    // Rate mutations
    // =========================================================================

    /// Create a rate; returns the refreshed zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are in the result.
    #[instrument(skip(self, input))]
    pub async fn create_shipping_rate(
        &self,
        input: ShippingPriceInput,
    ) -> Result<MutationResult<ZoneRecord>, SaleorError> {
        let variables = create_shipping_rate::Variables {
            input: create_shipping_rate_input(input),
        };
        let response = self.execute::<CreateShippingRate>(variables).await?;
        require_payload(convert_create_shipping_rate(response), "shippingPriceCreate")
    }

    /// Update a rate; returns the refreshed zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are in the result.
    #[instrument(skip(self, input), fields(rate_id = %id))]
    pub async fn update_shipping_rate(
        &self,
        id: &ShippingMethodId,
        input: ShippingPriceInput,
    ) -> Result<MutationResult<ZoneRecord>, SaleorError> {
        let variables = update_shipping_rate::Variables {
            id: id.to_string(),
            input: update_shipping_rate_input(input),
        };
        let response = self.execute::<UpdateShippingRate>(variables).await?;
        require_payload(convert_update_shipping_rate(response), "shippingPriceUpdate")
    }

    /// Delete a rate. Success means the caller must drop it from its zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are returned as data.
    #[instrument(skip(self), fields(rate_id = %id))]
    pub async fn delete_shipping_rate(
        &self,
        id: &ShippingMethodId,
    ) -> Result<Vec<UserError>, SaleorError> {
        let variables = delete_shipping_rate::Variables { id: id.to_string() };
        let response = self.execute::<DeleteShippingRate>(variables).await?;
        require_payload(convert_delete_shipping_rate(response), "shippingPriceDelete")
    }

    /// Delete several rates at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are returned as data.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn bulk_delete_shipping_rates(
        &self,
        ids: Vec<ShippingMethodId>,
    ) -> Result<Vec<UserError>, SaleorError> {
        let variables = bulk_delete_shipping_rate::Variables {
            ids: ids.into_iter().map(ShippingMethodId::into_inner).collect(),
        };
        let response = self.execute::<BulkDeleteShippingRate>(variables).await?;
        require_payload(
            convert_bulk_delete_shipping_rate(response),
            "shippingPriceBulkDelete",
        )
    }

    // =========================================================================
    // Warehouse mutations
    // =========================================================================

    /// Make the warehouse ship to the zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; `warehouseErrors` are returned as data.
    #[instrument(skip(self), fields(warehouse_id = %warehouse_id, zone_id = %zone_id))]
    pub async fn assign_warehouse(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ShippingZoneId,
    ) -> Result<Vec<WarehouseError>, SaleorError> {
        let variables = assign_shipping_zone_to_warehouse::Variables {
            warehouse_id: warehouse_id.to_string(),
            shipping_zone_id: zone_id.to_string(),
        };
        let response = self
            .execute::<AssignShippingZoneToWarehouse>(variables)
            .await?;
        require_payload(
            convert_assign_warehouse(response),
            "assignWarehouseShippingZone",
        )
    }

    /// Stop the warehouse shipping to the zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; `warehouseErrors` are returned as data.
    #[instrument(skip(self), fields(warehouse_id = %warehouse_id, zone_id = %zone_id))]
    pub async fn unassign_warehouse(
        &self,
        warehouse_id: &WarehouseId,
        zone_id: &ShippingZoneId,
    ) -> Result<Vec<WarehouseError>, SaleorError> {
        let variables = unassign_shipping_zone_to_warehouse::Variables {
            warehouse_id: warehouse_id.to_string(),
            shipping_zone_id: zone_id.to_string(),
        };
        let response = self
            .execute::<UnassignShippingZoneToWarehouse>(variables)
            .await?;
        require_payload(
            convert_unassign_warehouse(response),
            "unassignWarehouseShippingZone",
        )
    }

    /// Create a warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; `warehouseErrors` are in the result.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_warehouse(
        &self,
        input: WarehouseCreateInput,
    ) -> Result<MutationResult<WarehouseRef, WarehouseError>, SaleorError> {
        let variables = create_warehouse::Variables {
            input: create_warehouse_input(input),
        };
        let response = self.execute::<CreateWarehouse>(variables).await?;
        require_payload(convert_create_warehouse(response), "createWarehouse")
    }

    // =========================================================================
    // Shop settings
    // =========================================================================

    /// Change the shop-wide default weight unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; field errors are in the result.
    #[instrument(skip(self))]
    pub async fn update_default_weight_unit(
        &self,
        unit: WeightUnit,
    ) -> Result<MutationResult<WeightUnit>, SaleorError> {
        let variables = update_default_weight_unit::Variables {
            unit: Some(weight_unit_input(unit)),
        };
        let response = self.execute::<UpdateDefaultWeightUnit>(variables).await?;
        require_payload(convert_default_weight_unit(response), "shopSettingsUpdate")
    }
}
