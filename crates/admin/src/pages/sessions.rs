//! In-memory store of zone edit sessions.
//!
//! Uses `moka` with an idle TTL so abandoned pages expire on their own. Each
//! request reads the page, applies one event and writes it back; there is no
//! locking across requests, so two concurrent events on the same session race
//! and the last write wins.

use std::time::Duration;

use harbor_core::ShippingZoneId;
use moka::future::Cache;
use uuid::Uuid;

use super::ZoneDetailsPage;

const MAX_SESSIONS: u64 = 10_000;

/// Zone edit sessions keyed by a random id.
#[derive(Clone)]
pub struct EditSessions {
    cache: Cache<Uuid, ZoneDetailsPage>,
}

impl EditSessions {
    /// Sessions expire after `ttl` without a request.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(ttl)
                .build(),
        }
    }

    /// Store a freshly mounted page under a new id.
    pub async fn open(&self, page: ZoneDetailsPage) -> Uuid {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, zone_id = %page.zone().id, "Opened edit session");
        self.cache.insert(id, page).await;
        id
    }

    /// The page for `session`, if it is still alive and belongs to `zone_id`.
    pub async fn get(&self, session: Uuid, zone_id: &ShippingZoneId) -> Option<ZoneDetailsPage> {
        self.cache
            .get(&session)
            .await
            .filter(|page| &page.zone().id == zone_id)
    }

    /// Write back a page after applying an event.
    pub async fn save(&self, session: Uuid, page: ZoneDetailsPage) {
        self.cache.insert(session, page).await;
    }

    /// Apply `f` to the page and write it back.
    ///
    /// Returns `None` when the session has expired or belongs to another zone.
    pub async fn update<R>(
        &self,
        session: Uuid,
        zone_id: &ShippingZoneId,
        f: impl FnOnce(&mut ZoneDetailsPage) -> R,
    ) -> Option<R> {
        let mut page = self.get(session, zone_id).await?;
        let result = f(&mut page);
        self.save(session, page).await;
        Some(result)
    }

    /// Drop a session (cancel, zone deleted).
    pub async fn discard(&self, session: Uuid) {
        self.cache.invalidate(&session).await;
    }
}
