//! GraphQL commerce API client for shipping configuration.
//!
//! # Security
//!
//! The client holds a staff/app token with write access to shipping zones,
//! rates, warehouses and shop settings. Only run on trusted infrastructure.
//!
//! # Architecture
//!
//! - Operations are generated by `graphql_client` from the documents in
//!   `graphql/saleor/queries/` ([`queries`]) and converted into domain types
//!   before they leave this module
//! - One generic executor (`SaleorClient::execute`) sends every operation
//! - Each mutation is executed exactly once per call; no retries, no batching
//! - Mutation payload errors are returned as data ([`MutationResult`]); only
//!   transport and top-level GraphQL failures become [`SaleorError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use harbor_admin::saleor::SaleorClient;
//!
//! let client = SaleorClient::new(&config.saleor);
//!
//! let zone = client.shipping_zone(&zone_id).await?;
//! let errors = client.delete_shipping_rate(&rate_id).await?;
//! if errors.is_empty() {
//!     // remove the rate from the cached zone
//! }
//! ```

mod client;
mod conversions;
pub mod queries;
mod shipping;
pub mod types;

pub use client::SaleorClient;
pub use shipping::ShippingZoneList;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the GraphQL API.
#[derive(Debug, Error)]
pub enum SaleorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL request returned top-level errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A top-level GraphQL error.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
