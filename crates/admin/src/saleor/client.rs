//! GraphQL API client and the generic operation executor.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::config::SaleorConfig;

use super::{GraphQLError, GraphQLErrorLocation, SaleorError};

/// Client for the GraphQL commerce API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SaleorClient {
    inner: Arc<SaleorClientInner>,
}

struct SaleorClientInner {
    client: reqwest::Client,
    endpoint: Url,
    token: SecretString,
}

impl SaleorClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &SaleorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(SaleorClientInner {
                client,
                endpoint: config.api_url.clone(),
                token: config.token.clone(),
            }),
        }
    }

    /// The GraphQL endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation once and return its `data`.
    ///
    /// # Errors
    ///
    /// Returns `SaleorError::Http` if the request fails,
    /// `SaleorError::RateLimited`/`Unauthorized` for 429/401 responses,
    /// `SaleorError::Parse` for malformed bodies and `SaleorError::GraphQL`
    /// for top-level GraphQL errors or a missing `data` field.
    pub(super) async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, SaleorError> {
        let request_body = Q::build_query(variables);
        let operation = request_body.operation_name;

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .bearer_auth(self.inner.token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SaleorError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(SaleorError::Unauthorized(
                "Invalid or expired API token".to_string(),
            ));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                operation,
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "GraphQL API returned non-success status"
            );
            return Err(SaleorError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    operation,
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse GraphQL response"
                );
                return Err(SaleorError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(operation, errors = ?errors, "GraphQL errors in response");

            return Err(SaleorError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(operation, "GraphQL response has no data and no errors");
            SaleorError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }
}

/// Turn a missing mutation payload into an error naming the mutation.
pub(super) fn require_payload<T>(payload: Option<T>, field: &str) -> Result<T, SaleorError> {
    payload.ok_or_else(|| {
        SaleorError::GraphQL(vec![GraphQLError::message(format!(
            "Mutation `{field}` returned no payload"
        ))])
    })
}
