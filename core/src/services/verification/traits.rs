//! Traits for SMS delivery and session storage integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::verification_session::{SessionId, VerificationSession};

use super::admission::InsertLimits;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message ID
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
    /// Name of the underlying provider, for logs
    fn provider_name(&self) -> &str;
}

/// Errors reported by a session store
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// A live session already uses this identifier
    #[error("Session already exists: {0}")]
    Duplicate(SessionId),

    /// The phone number received a session inside the resend cooldown
    #[error("Resend cooldown active, last session issued at {latest_created_at}")]
    CooldownActive { latest_created_at: DateTime<Utc> },

    /// The live-session cap is reached even after dropping expired sessions
    #[error("Session store is full (limit {limit})")]
    Full { limit: usize },

    /// The backing storage failed
    #[error("Session store unavailable: {0}")]
    Backend(String),
}

/// Trait for the live-session store
///
/// Every method is a single atomic step; `remove` returns the removed session
/// so that only one caller can ever consume a given session, and `insert`
/// applies its [`InsertLimits`] under the same lock as the write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session if `limits` admit it
    async fn insert(
        &self,
        session: VerificationSession,
        limits: InsertLimits,
    ) -> Result<(), SessionStoreError>;

    /// Look a session up without consuming it
    async fn get(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<VerificationSession>, SessionStoreError>;

    /// Remove a session, returning it if it was present
    async fn remove(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<VerificationSession>, SessionStoreError>;

    /// Remove every session of a phone number except `keep`, returning how many were removed
    async fn remove_by_phone(
        &self,
        phone: &str,
        keep: Option<&SessionId>,
    ) -> Result<usize, SessionStoreError>;

    /// Remove every session expired at `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError>;

    /// Number of sessions currently held
    async fn len(&self) -> Result<usize, SessionStoreError>;
}
