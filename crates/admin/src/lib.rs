//! Harbor Admin library.
//!
//! Server-rendered back office for the shipping configuration of a GraphQL
//! commerce API: shipping zones, their countries, price/weight rates and the
//! warehouse each zone ships from. Exposed as a library so the router can be
//! driven from tests.
//!
//! # Security
//!
//! The configured API token can change shop-wide shipping settings. The
//! panel has no login of its own; bind it to a private interface.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod pages;
pub mod routes;
pub mod saleor;
pub mod state;

use state::AppState;

/// Build the full application: routes, `/health`, tracing and Sentry layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the API.
async fn health() -> &'static str {
    "ok"
}
