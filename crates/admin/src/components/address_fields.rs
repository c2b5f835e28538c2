//! Address inputs shared by the warehouse forms.

use askama::Template;
use harbor_core::{AddressField, AddressRecord, Country};

use super::choice_list::{Choice, ChoiceListField};
use crate::forms::FieldErrors;

/// One rendered address input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInput {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub error: String,
    /// Rendered by the country choice list instead of a text input.
    pub is_country: bool,
}

/// Stateless address field set over an [`AddressRecord`].
///
/// Each input shows the error recorded under its own field name. The country
/// input shows the country name while storing its code.
#[derive(Debug, Clone, Template)]
#[template(path = "components/address_fields.html")]
pub struct AddressFieldSet {
    pub inputs: Vec<AddressInput>,
    pub country: ChoiceListField,
    pub disabled: bool,
}

impl AddressFieldSet {
    #[must_use]
    pub fn new(
        record: &AddressRecord,
        errors: &FieldErrors,
        countries: &[Country],
        disabled: bool,
    ) -> Self {
        let inputs = AddressField::ALL
            .into_iter()
            .map(|field| AddressInput {
                name: field.name(),
                label: field.label(),
                value: record.get(field).to_string(),
                error: errors.message(field.name()).to_string(),
                is_country: field == AddressField::Country,
            })
            .collect();

        let choices = countries
            .iter()
            .map(|c| Choice::new(c.country.clone(), c.code.to_string()))
            .collect();
        let mut country = ChoiceListField::new(
            AddressField::Country.name(),
            AddressField::Country.label(),
            choices,
        )
        .with_value(record.country.clone());
        country.error = errors.get(AddressField::Country.name()).map(String::from);
        country.disabled = disabled;

        Self {
            inputs,
            country,
            disabled,
        }
    }

    /// Apply a change to exactly one field of `record`.
    pub fn change(record: &mut AddressRecord, field: AddressField, value: impl Into<String>) {
        record.set(field, value);
    }

    /// Names of every field this set renders, for building [`FieldErrors`].
    #[must_use]
    pub fn field_names() -> Vec<&'static str> {
        AddressField::ALL.into_iter().map(AddressField::name).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use harbor_core::CountryCode;

    fn countries() -> Vec<Country> {
        vec![
            Country {
                code: CountryCode::parse("DE").unwrap(),
                country: "Germany".to_string(),
            },
            Country {
                code: CountryCode::parse("FR").unwrap(),
                country: "France".to_string(),
            },
        ]
    }

    #[test]
    fn test_change_updates_one_field() {
        let mut record = AddressRecord::default();
        AddressFieldSet::change(&mut record, AddressField::City, "Berlin");

        assert_eq!(record.city, "Berlin");
        assert_eq!(record, AddressRecord {
            city: "Berlin".to_string(),
            ..AddressRecord::default()
        });
    }

    #[test]
    fn test_country_shows_name_and_stores_code() {
        let record = AddressRecord {
            country: "FR".to_string(),
            ..AddressRecord::default()
        };
        let set = AddressFieldSet::new(&record, &FieldErrors::new(), &countries(), false);

        assert_eq!(set.country.value, "FR");
        assert_eq!(set.country.display_value, "France");
    }

    #[test]
    fn test_errors_are_shown_under_their_field() {
        let mut errors = FieldErrors::new();
        errors.insert("postalCode", "Invalid postal code");

        let set = AddressFieldSet::new(&AddressRecord::default(), &errors, &countries(), false);
        let postal = set.inputs.iter().find(|i| i.name == "postalCode").unwrap();
        let city = set.inputs.iter().find(|i| i.name == "city").unwrap();

        assert_eq!(postal.error, "Invalid postal code");
        assert_eq!(city.error, "");
        assert!(set.render().unwrap().contains("Invalid postal code"));
    }

    #[test]
    fn test_renders_all_fields_in_order() {
        let set = AddressFieldSet::new(&AddressRecord::default(), &FieldErrors::new(), &[], false);
        let names: Vec<&str> = set.inputs.iter().map(|i| i.name).collect();
        assert_eq!(names, AddressFieldSet::field_names());
        assert_eq!(names.first(), Some(&"companyName"));
        assert_eq!(names.last(), Some(&"phone"));
    }
}
