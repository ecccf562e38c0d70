//! Admission rules a store applies atomically with an insert

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::entities::verification_session::{SessionId, VerificationSession};

use super::traits::SessionStoreError;

/// Limits checked in the same critical section as the insert they guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertLimits {
    /// Maximum number of live sessions (0 = unbounded)
    pub max_live_sessions: usize,
    /// Reject the insert while the phone number has a session issued after this instant
    pub cooldown_cutoff: Option<DateTime<Utc>>,
}

impl InsertLimits {
    /// No cap and no cooldown
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Check `candidate` against the sessions of a map-backed store
    ///
    /// When the store is full, sessions expired at the candidate's issue time
    /// are dropped first. Returns how many were dropped that way.
    pub fn admit(
        &self,
        sessions: &mut HashMap<SessionId, VerificationSession>,
        candidate: &VerificationSession,
    ) -> Result<usize, SessionStoreError> {
        if let Some(cutoff) = self.cooldown_cutoff {
            let latest = sessions
                .values()
                .filter(|s| s.phone_number == candidate.phone_number && s.created_at > cutoff)
                .map(|s| s.created_at)
                .max();
            if let Some(latest_created_at) = latest {
                return Err(SessionStoreError::CooldownActive { latest_created_at });
            }
        }

        let mut purged = 0;
        let limit = self.max_live_sessions;
        if limit > 0 && sessions.len() >= limit {
            let before = sessions.len();
            sessions.retain(|_, s| !s.is_expired_at(candidate.created_at));
            purged = before - sessions.len();
            if sessions.len() >= limit {
                return Err(SessionStoreError::Full { limit });
            }
        }

        if sessions.contains_key(&candidate.session_id) {
            return Err(SessionStoreError::Duplicate(candidate.session_id.clone()));
        }
        Ok(purged)
    }
}
