//! Country code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CountryCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CountryCodeError {
    /// The input string is empty.
    #[error("country code cannot be empty")]
    Empty,
    /// The input is not exactly two characters long.
    #[error("country code must be exactly 2 letters (got {len})")]
    WrongLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains something other than ASCII letters.
    #[error("country code must contain only ASCII letters")]
    NotAlphabetic,
}

/// An ISO 3166-1 alpha-2 country code, stored upper-case.
///
/// ## Examples
///
/// ```
/// use harbor_core::CountryCode;
///
/// assert_eq!(CountryCode::parse("de").unwrap().as_str(), "DE");
/// assert!(CountryCode::parse("").is_err());
/// assert!(CountryCode::parse("DEU").is_err());
/// assert!(CountryCode::parse("D1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a `CountryCode`, normalising to upper-case.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not two characters long, or
    /// contains non-letters.
    pub fn parse(s: &str) -> Result<Self, CountryCodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CountryCodeError::Empty);
        }

        let len = s.chars().count();
        if len != 2 {
            return Err(CountryCodeError::WrongLength { len });
        }

        if !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CountryCodeError::NotAlphabetic);
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A country as reported by the API: its code and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// ISO code.
    pub code: CountryCode,
    /// Human-readable name (e.g., "Germany").
    pub country: String,
}
