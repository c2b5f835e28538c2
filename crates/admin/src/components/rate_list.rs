//! Price- or weight-based rate list for a zone.

use askama::Template;

use crate::saleor::{RateRecord, ShippingMethodType};

/// Rates of `method_type` in their original order.
///
/// Every rate lands in exactly one of the price and weight lists.
#[must_use]
pub fn rates_of_type(methods: &[RateRecord], method_type: ShippingMethodType) -> Vec<&RateRecord> {
    methods
        .iter()
        .filter(|rate| rate.method_type == method_type)
        .collect()
}

/// One rendered rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRow {
    pub id: String,
    pub name: String,
    pub value_range: String,
    pub price: String,
    pub edit_href: String,
    pub remove_action: String,
}

impl RateRow {
    fn new(rate: &RateRecord, zone_path: &str, session: &str) -> Self {
        let value_range = match rate.method_type {
            ShippingMethodType::Price => format_range(
                rate.minimum_order_price.as_ref().map(ToString::to_string),
                rate.maximum_order_price.as_ref().map(ToString::to_string),
            ),
            ShippingMethodType::Weight => format_range(
                rate.minimum_order_weight.as_ref().map(ToString::to_string),
                rate.maximum_order_weight.as_ref().map(ToString::to_string),
            ),
        };

        let id = urlencoding::encode(rate.id.as_str());
        Self {
            id: rate.id.to_string(),
            name: rate.name.clone(),
            value_range,
            price: rate
                .price
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            edit_href: format!("{zone_path}/rates/{id}?session={session}"),
            remove_action: format!("{zone_path}/rates/{id}/delete"),
        }
    }
}

fn format_range(min: Option<String>, max: Option<String>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        (Some(min), None) => format!("from {min}"),
        (None, Some(max)) => format!("up to {max}"),
        (None, None) => "-".to_string(),
    }
}

/// Rate list for one variant. Renders actions, never mutates.
#[derive(Debug, Clone, Template)]
#[template(path = "components/rate_list.html")]
pub struct RateList {
    pub variant: ShippingMethodType,
    pub title: &'static str,
    pub range_label: &'static str,
    pub rows: Vec<RateRow>,
    pub add_href: String,
    pub bulk_delete_action: String,
    /// Edit session the actions report back to.
    pub session: String,
    pub disabled: bool,
}

impl RateList {
    /// List the `variant` rates among `methods`.
    #[must_use]
    pub fn new(
        methods: &[RateRecord],
        variant: ShippingMethodType,
        zone_path: &str,
        session: &str,
        disabled: bool,
    ) -> Self {
        let (title, range_label) = match variant {
            ShippingMethodType::Price => ("Price Based Rates", "Value range"),
            ShippingMethodType::Weight => ("Weight Based Rates", "Weight range"),
        };

        Self {
            variant,
            title,
            range_label,
            rows: rates_of_type(methods, variant)
                .into_iter()
                .map(|rate| RateRow::new(rate, zone_path, session))
                .collect(),
            add_href: format!(
                "{zone_path}/rates/new?type={}&session={session}",
                variant.slug()
            ),
            bulk_delete_action: format!("{zone_path}/rates/bulk-delete"),
            session: session.to_string(),
            disabled,
        }
    }

    /// Ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id.as_str()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use harbor_core::{Money, Weight, WeightUnit};
    use rust_decimal::Decimal;

    fn rate(id: &str, method_type: ShippingMethodType) -> RateRecord {
        RateRecord {
            id: id.into(),
            name: format!("Rate {id}"),
            method_type,
            price: Some(Money::new(Decimal::new(500, 2), "EUR")),
            minimum_order_price: None,
            maximum_order_price: None,
            minimum_order_weight: None,
            maximum_order_weight: None,
        }
    }

    fn methods() -> Vec<RateRecord> {
        vec![
            rate("r1", ShippingMethodType::Price),
            rate("r2", ShippingMethodType::Weight),
            rate("r3", ShippingMethodType::Price),
            rate("r4", ShippingMethodType::Weight),
        ]
    }

    #[test]
    fn test_lists_partition_rates_in_order() {
        let methods = methods();
        let zone = "/shipping/z1";
        let price = RateList::new(&methods, ShippingMethodType::Price, zone, "s1", false);
        let weight = RateList::new(&methods, ShippingMethodType::Weight, zone, "s1", false);

        assert_eq!(price.ids(), vec!["r1", "r3"]);
        assert_eq!(weight.ids(), vec!["r2", "r4"]);

        let mut union: Vec<&str> = price.ids().into_iter().chain(weight.ids()).collect();
        union.sort_unstable();
        assert_eq!(union, vec!["r1", "r2", "r3", "r4"]);
        assert!(price.ids().iter().all(|id| !weight.ids().contains(id)));
    }

    #[test]
    fn test_empty_methods_render_empty_lists() {
        let list = RateList::new(&[], ShippingMethodType::Weight, "/shipping/z1", "s1", false);
        assert!(list.rows.is_empty());
        assert!(list.render().unwrap().contains("No shipping rates"));
    }

    #[test]
    fn test_row_targets_and_ranges() {
        let mut weight = rate("r2", ShippingMethodType::Weight);
        weight.minimum_order_weight = Some(Weight {
            unit: WeightUnit::Kg,
            value: 1.0,
        });
        weight.maximum_order_weight = Some(Weight {
            unit: WeightUnit::Kg,
            value: 5.0,
        });

        let list = RateList::new(
            &[weight],
            ShippingMethodType::Weight,
            "/shipping/z1",
            "s1",
            false,
        );
        let row = &list.rows[0];
        assert_eq!(row.edit_href, "/shipping/z1/rates/r2?session=s1");
        assert_eq!(row.remove_action, "/shipping/z1/rates/r2/delete");
        assert_eq!(row.value_range, "1 kg - 5 kg");
        assert_eq!(row.price, "5.00 EUR");
        assert_eq!(list.add_href, "/shipping/z1/rates/new?type=weight&session=s1");
    }

    #[test]
    fn test_row_targets_encode_rate_id() {
        let list = RateList::new(
            &[rate("U2hpcHBpbmc6MQ==/x", ShippingMethodType::Price)],
            ShippingMethodType::Price,
            "/shipping/z1",
            "s1",
            false,
        );
        let row = &list.rows[0];
        assert_eq!(row.id, "U2hpcHBpbmc6MQ==/x");
        assert_eq!(
            row.edit_href,
            "/shipping/z1/rates/U2hpcHBpbmc6MQ%3D%3D%2Fx?session=s1"
        );
        assert_eq!(
            row.remove_action,
            "/shipping/z1/rates/U2hpcHBpbmc6MQ%3D%3D%2Fx/delete"
        );
    }

    #[test]
    fn test_format_range_open_ends() {
        assert_eq!(format_range(Some("1".into()), None), "from 1");
        assert_eq!(format_range(None, Some("9".into())), "up to 9");
        assert_eq!(format_range(None, None), "-");
    }
}
