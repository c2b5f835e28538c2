//! Monetary amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in a given currency, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_float_amount() {
        let money: Money = serde_json::from_str(r#"{"amount":9.5,"currency":"EUR"}"#).unwrap();
        assert_eq!(money.amount, Decimal::new(95, 1));
        assert_eq!(money.currency, "EUR");
    }

    #[test]
    fn test_display_uses_two_decimals() {
        let money = Money::new(Decimal::new(5, 0), "USD");
        assert_eq!(money.to_string(), "5.00 USD");
    }
}
