//! Flat postal address record edited by the address field-set.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a form field name does not name an address field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown address field: {0}")]
pub struct UnknownAddressField(pub String);

/// A postal address as plain text fields.
///
/// No field is required at this layer; the API validates on save.
/// Serializes with the API's camelCase field names so it can be sent as an
/// `AddressInput` directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRecord {
    pub company_name: String,
    pub street_address_1: String,
    pub street_address_2: String,
    pub city: String,
    pub postal_code: String,
    /// Country code (ISO 3166-1 alpha-2), empty until chosen.
    pub country: String,
    pub country_area: String,
    pub phone: String,
}

/// Names of the editable fields of an [`AddressRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    CompanyName,
    StreetAddress1,
    StreetAddress2,
    City,
    PostalCode,
    Country,
    CountryArea,
    Phone,
}

impl AddressField {
    /// All fields in rendering order.
    pub const ALL: [Self; 8] = [
        Self::CompanyName,
        Self::StreetAddress1,
        Self::StreetAddress2,
        Self::City,
        Self::PostalCode,
        Self::Country,
        Self::CountryArea,
        Self::Phone,
    ];

    /// The form/API name of the field (e.g., `streetAddress1`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::StreetAddress1 => "streetAddress1",
            Self::StreetAddress2 => "streetAddress2",
            Self::City => "city",
            Self::PostalCode => "postalCode",
            Self::Country => "country",
            Self::CountryArea => "countryArea",
            Self::Phone => "phone",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company",
            Self::StreetAddress1 => "Address line 1",
            Self::StreetAddress2 => "Address line 2",
            Self::City => "City",
            Self::PostalCode => "ZIP / Postal code",
            Self::Country => "Country",
            Self::CountryArea => "Country area",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AddressField {
    type Err = UnknownAddressField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownAddressField(s.to_owned()))
    }
}

impl AddressRecord {
    /// Read a field by name.
    #[must_use]
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::CompanyName => &self.company_name,
            AddressField::StreetAddress1 => &self.street_address_1,
            AddressField::StreetAddress2 => &self.street_address_2,
            AddressField::City => &self.city,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Country => &self.country,
            AddressField::CountryArea => &self.country_area,
            AddressField::Phone => &self.phone,
        }
    }

    /// Replace a single field, leaving the others untouched.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::CompanyName => &mut self.company_name,
            AddressField::StreetAddress1 => &mut self.street_address_1,
            AddressField::StreetAddress2 => &mut self.street_address_2,
            AddressField::City => &mut self.city,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Country => &mut self.country,
            AddressField::CountryArea => &mut self.country_area,
            AddressField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in AddressField::ALL {
            assert_eq!(field.name().parse::<AddressField>().unwrap(), field);
        }
        assert!("street".parse::<AddressField>().is_err());
    }

    #[test]
    fn test_set_changes_only_named_field() {
        let mut address = AddressRecord {
            city: "Berlin".to_string(),
            ..AddressRecord::default()
        };
        address.set(AddressField::PostalCode, "10115");

        assert_eq!(address.get(AddressField::PostalCode), "10115");
        assert_eq!(address.get(AddressField::City), "Berlin");
        assert_eq!(address.get(AddressField::Phone), "");
    }

    #[test]
    fn test_serializes_with_api_field_names() {
        let address = AddressRecord {
            street_address_1: "Main St 1".to_string(),
            ..AddressRecord::default()
        };
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["streetAddress1"], "Main St 1");
        assert_eq!(json["companyName"], "");
    }
}
