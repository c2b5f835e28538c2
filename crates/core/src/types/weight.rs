//! Weight units and weights.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a weight unit string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown weight unit: {0}")]
pub struct WeightUnitError(pub String);

/// Unit of weight, matching the API's `WeightUnitsEnum`.
///
/// The shop has one default unit which is used when rates are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    G,
    Lb,
    Oz,
    #[default]
    Kg,
}

impl WeightUnit {
    /// All units in display order.
    pub const ALL: [Self; 4] = [Self::G, Self::Lb, Self::Oz, Self::Kg];

    /// The GraphQL enum value (e.g., `KG`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Lb => "LB",
            Self::Oz => "OZ",
            Self::Kg => "KG",
        }
    }

    /// Short lowercase symbol for display (e.g., `kg`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::G => "g",
            Self::Lb => "lb",
            Self::Oz => "oz",
            Self::Kg => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = WeightUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "G" => Ok(Self::G),
            "LB" => Ok(Self::Lb),
            "OZ" => Ok(Self::Oz),
            "KG" => Ok(Self::Kg),
            _ => Err(WeightUnitError(s.to_owned())),
        }
    }
}

/// A weight value with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    /// Unit of `value`.
    pub unit: WeightUnit,
    /// Numeric weight.
    pub value: f64,
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}
