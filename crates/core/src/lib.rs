//! Harbor Core - Shared domain types.
//!
//! This crate provides the types shared by the Harbor components:
//! - `admin` - Shipping zone back office (server-rendered)
//! - `integration-tests` - Contract tests against a mock GraphQL API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for GraphQL IDs, country codes, weights,
//!   money and postal addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
