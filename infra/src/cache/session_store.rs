//! In-memory session store implementation
//!
//! Keeps live verification sessions in a `HashMap` behind an async
//! `RwLock`. Every trait method takes the lock once, so a lookup-and-remove
//! performed through `remove` can only succeed for one caller, and the cap and
//! cooldown checks of `insert` cannot race with other inserts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use tf_core::domain::{SessionId, VerificationSession};
use tf_core::services::verification::{InsertLimits, SessionStore, SessionStoreError};

/// Process-local store of live verification sessions
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, VerificationSession>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(
        &self,
        session: VerificationSession,
        limits: InsertLimits,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let purged = limits.admit(&mut sessions, &session)?;
        if purged > 0 {
            debug!(purged, "Dropped expired sessions to make room");
        }
        debug!(session_id = %session.session_id, "Storing verification session");
        sessions.insert(session.session_id.clone(), session);
        Ok(())
    }

    async fn get(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<VerificationSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn remove(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<VerificationSession>, SessionStoreError> {
        Ok(self.sessions.write().await.remove(session_id))
    }

    async fn remove_by_phone(
        &self,
        phone: &str,
        keep: Option<&SessionId>,
    ) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| session.phone_number != phone || Some(id) == keep);
        Ok(before - sessions.len())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }

    async fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }
}
