//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::saleor::SaleorError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// GraphQL API operation failed.
    #[error("API error: {0}")]
    Saleor(#[from] SaleorError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is the server's fault (reported to Sentry).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        match self {
            Self::Saleor(SaleorError::NotFound(_)) | Self::NotFound(_) | Self::BadRequest(_) => {
                false
            }
            Self::Saleor(_) | Self::Internal(_) => true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Saleor(SaleorError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Saleor(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Saleor(SaleorError::NotFound(what)) => format!("Not found: {what}"),
            Self::Saleor(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}
