//! Core types for Harbor.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod country;
pub mod id;
pub mod price;
pub mod weight;

pub use address::{AddressField, AddressRecord, UnknownAddressField};
pub use country::{Country, CountryCode, CountryCodeError};
pub use id::*;
pub use price::Money;
pub use weight::{Weight, WeightUnit, WeightUnitError};
