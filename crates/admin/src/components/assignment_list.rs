//! Country assignment list for a zone.

use askama::Template;
use harbor_core::{Country, CountryCode};

use crate::saleor::ZoneRecord;

/// Shown when a default zone has no countries of its own.
pub const DEFAULT_ZONE_TEXT: &str = "This is default shipping zone, which means that it covers \
    all of the countries which are not assigned to other shipping zones";

/// Shown when any other zone has no countries.
pub const EMPTY_TEXT: &str = "Currently, there are no countries assigned to this shipping zone";

/// Shown while the zone hasn't loaded.
const LOADING_TEXT: &str = "...";

/// One assigned country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub code: String,
    pub name: String,
    /// POST target removing the country from the zone.
    pub unassign_action: String,
}

/// Assigned countries with assign/unassign actions.
///
/// Nothing is staged locally: "assign" opens the assignment page and
/// "unassign" posts an immediate removal.
#[derive(Debug, Clone, Template)]
#[template(path = "components/assignment_list.html")]
pub struct AssignmentList {
    pub title: String,
    pub countries: Vec<CountryRow>,
    pub empty_text: String,
    pub assign_href: String,
    /// Edit session the actions report back to.
    pub session: String,
    pub disabled: bool,
}

impl AssignmentList {
    /// Country list of `zone`, with actions rooted at `zone_path`.
    #[must_use]
    pub fn for_zone(
        zone: Option<&ZoneRecord>,
        zone_path: &str,
        session: &str,
        disabled: bool,
    ) -> Self {
        let empty_text = match zone {
            None => LOADING_TEXT,
            Some(zone) if zone.default => DEFAULT_ZONE_TEXT,
            Some(_) => EMPTY_TEXT,
        };

        Self {
            title: "Countries".to_string(),
            countries: zone
                .map(|z| z.countries.as_slice())
                .unwrap_or_default()
                .iter()
                .map(|country| CountryRow {
                    code: country.code.to_string(),
                    name: country.country.clone(),
                    unassign_action: unassign_action(zone_path, &country.code),
                })
                .collect(),
            empty_text: empty_text.to_string(),
            assign_href: format!("{zone_path}/countries/assign?session={session}"),
            session: session.to_string(),
            disabled,
        }
    }
}

/// POST target removing `code` from the zone at `zone_path`.
#[must_use]
pub fn unassign_action(zone_path: &str, code: &CountryCode) -> String {
    format!("{zone_path}/countries/{code}/unassign")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn zone(default: bool, countries: Vec<Country>) -> ZoneRecord {
        ZoneRecord {
            id: "z1".into(),
            name: "Rest of world".to_string(),
            default,
            countries,
            shipping_methods: vec![],
            warehouses: vec![],
        }
    }

    #[test]
    fn test_default_zone_without_countries_shows_placeholder() {
        let list = AssignmentList::for_zone(Some(&zone(true, vec![])), "/shipping/z1", "s1", false);
        assert_eq!(list.empty_text, DEFAULT_ZONE_TEXT);

        let html = list.render().unwrap();
        assert!(html.contains("covers all of the countries"));
    }

    #[test]
    fn test_regular_zone_without_countries_shows_generic_text() {
        let zone = zone(false, vec![]);
        let list = AssignmentList::for_zone(Some(&zone), "/shipping/z1", "s1", false);
        assert_eq!(list.empty_text, EMPTY_TEXT);
    }

    #[test]
    fn test_lists_countries_with_unassign_actions() {
        let de = Country {
            code: CountryCode::parse("DE").unwrap(),
            country: "Germany".to_string(),
        };
        let zone = zone(false, vec![de]);
        let list = AssignmentList::for_zone(Some(&zone), "/shipping/z1", "s1", false);

        assert_eq!(list.countries[0].unassign_action, "/shipping/z1/countries/DE/unassign");
        let html = list.render().unwrap();
        assert!(html.contains("Germany"));
        assert!(!html.contains(EMPTY_TEXT));
    }
}
