//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AdminConfig;
use crate::pages::EditSessions;
use crate::saleor::SaleorClient;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    saleor: SaleorClient,
    sessions: EditSessions,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let saleor = SaleorClient::new(&config.saleor);
        let sessions = EditSessions::new(Duration::from_secs(config.edit_session_ttl_secs));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                saleor,
                sessions,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// GraphQL API client.
    #[must_use]
    pub fn saleor(&self) -> &SaleorClient {
        &self.inner.saleor
    }

    /// Zone edit sessions.
    #[must_use]
    pub fn sessions(&self) -> &EditSessions {
        &self.inner.sessions
    }
}
