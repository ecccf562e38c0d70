//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_session::SessionId;

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Identifier of the new session
    pub session_id: SessionId,
    /// The issued code, for local and test consumption only
    pub code: String,
    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}
