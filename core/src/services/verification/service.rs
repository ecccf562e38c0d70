//! Main verification service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tf_shared::utils::phone::mask_phone_number;

use crate::domain::entities::verification_session::{SessionId, VerificationSession};
use crate::domain::value_objects::VerificationOutcome;
use crate::errors::{DomainError, DomainResult};

use super::admission::InsertLimits;
use super::clock::{Clock, SystemClock};
use super::config::VerificationServiceConfig;
use super::traits::{SessionStore, SessionStoreError, SmsServiceTrait};
use super::types::SendCodeResult;

/// Attempts at drawing an unused session identifier before giving up
const MAX_SESSION_ID_ATTEMPTS: usize = 3;

/// Verification session manager
///
/// Sole source of truth for "is this phone number, for this attempt,
/// currently verified". Sessions live in the injected [`SessionStore`]; codes
/// are delivered through the injected [`SmsServiceTrait`].
pub struct VerificationService<S: SmsServiceTrait, T: SessionStore> {
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Store of live sessions
    session_store: Arc<T>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: SmsServiceTrait, T: SessionStore> VerificationService<S, T> {
    /// Create a new verification service using the system clock
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS service implementation
    /// * `session_store` - Session store implementation
    /// * `config` - Service configuration
    pub fn new(
        sms_service: Arc<S>,
        session_store: Arc<T>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self::with_clock(sms_service, session_store, config, Arc::new(SystemClock))
    }

    /// Create a new verification service with an explicit time source
    pub fn with_clock(
        sms_service: Arc<S>,
        session_store: Arc<T>,
        config: VerificationServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sms_service,
            session_store,
            clock,
            config,
        }
    }

    /// Issue a new verification session and send its code
    ///
    /// This method:
    /// 1. Rejects an empty phone number (format checks belong to the caller)
    /// 2. Stores a session with a fresh code and identifier, subject to the
    ///    resend cooldown (when enforced) and the live-session cap
    /// 3. Sends the code via SMS, dropping the session again if delivery fails
    /// 4. Supersedes older sessions of the phone number when configured
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The new session identifier, its code and expiry
    /// * `Err(DomainError)` - Validation, policy, delivery or store failure
    pub async fn request_code(&self, phone_number: &str) -> DomainResult<SendCodeResult> {
        let phone = phone_number.trim();
        if phone.is_empty() {
            return Err(DomainError::Validation {
                message: "Phone number must not be empty".to_string(),
            });
        }
        let masked_phone = mask_phone_number(phone);
        let now = self.clock.now();

        let session = VerificationSession::issue(phone, now, self.config.code_expiration_minutes);
        let session = self.store_session(session, &masked_phone).await?;

        tracing::info!(
            phone = %masked_phone,
            session_id = %session.session_id,
            expires_at = %session.expires_at,
            event = "otp_generated",
            "Issued new verification session"
        );

        let message_id = match self
            .sms_service
            .send_verification_code(phone, &session.code)
            .await
        {
            Ok(message_id) => message_id,
            Err(e) => {
                tracing::error!(
                    phone = %masked_phone,
                    session_id = %session.session_id,
                    provider = self.sms_service.provider_name(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code, discarding session"
                );
                if let Err(remove_err) = self.session_store.remove(&session.session_id).await {
                    tracing::warn!(
                        session_id = %session.session_id,
                        error = %remove_err,
                        "Failed to discard undelivered session"
                    );
                }
                return Err(DomainError::SmsDelivery { message: e });
            }
        };

        if self.config.supersede_previous_sessions {
            let removed = self
                .session_store
                .remove_by_phone(phone, Some(&session.session_id))
                .await
                .map_err(store_error)?;
            if removed > 0 {
                tracing::info!(
                    phone = %masked_phone,
                    superseded = removed,
                    event = "sessions_superseded",
                    "Invalidated previous verification sessions"
                );
            }
        }

        Ok(SendCodeResult {
            session_id: session.session_id,
            code: session.code,
            expires_at: session.expires_at,
            message_id,
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Check a submitted code against a session
    ///
    /// The comparison is a full-string equality. An expired session is removed
    /// when it is found, a verified session is consumed, and a mismatch leaves
    /// the session usable until it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationOutcome)` - One of `NotFound`, `Expired`, `Mismatch`, `Verified`
    /// * `Err(DomainError)` - Only when the session store fails
    pub async fn verify_code(
        &self,
        session_id: &str,
        submitted_code: &str,
    ) -> DomainResult<VerificationOutcome> {
        let session_id = SessionId::from(session_id.trim());
        let now = self.clock.now();

        let session = match self.session_store.get(&session_id).await.map_err(store_error)? {
            Some(session) => session,
            None => {
                tracing::warn!(
                    session_id = %session_id,
                    event = "otp_session_not_found",
                    "Verification attempted for unknown session"
                );
                return Ok(VerificationOutcome::NotFound);
            }
        };
        let masked_phone = mask_phone_number(&session.phone_number);

        if session.is_expired_at(now) {
            let removed = self
                .session_store
                .remove(&session_id)
                .await
                .map_err(store_error)?;
            tracing::info!(
                phone = %masked_phone,
                session_id = %session_id,
                event = "otp_expired",
                "Verification session expired"
            );
            return Ok(if removed.is_some() {
                VerificationOutcome::Expired
            } else {
                VerificationOutcome::NotFound
            });
        }

        if !session.matches(submitted_code) {
            tracing::warn!(
                phone = %masked_phone,
                session_id = %session_id,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Ok(VerificationOutcome::Mismatch);
        }

        // A concurrent request may have consumed the session in between.
        match self
            .session_store
            .remove(&session_id)
            .await
            .map_err(store_error)?
        {
            Some(_) => {
                tracing::info!(
                    phone = %masked_phone,
                    session_id = %session_id,
                    event = "otp_verified_success",
                    "Verification code successfully verified"
                );
                Ok(VerificationOutcome::Verified)
            }
            None => Ok(VerificationOutcome::NotFound),
        }
    }

    /// Reveal the code of a live session without consuming it
    ///
    /// Development helper standing in for a real SMS channel. Returns `None`
    /// for unknown or expired sessions and whenever the accessor is disabled.
    #[cfg(feature = "debug-codes")]
    pub async fn debug_code(&self, session_id: &str) -> Option<String> {
        if !self.config.debug_codes_enabled {
            return None;
        }

        let session_id = SessionId::from(session_id.trim());
        match self.session_store.get(&session_id).await {
            Ok(Some(session)) if !session.is_expired_at(self.clock.now()) => {
                tracing::debug!(session_id = %session_id, "Debug code accessed");
                Some(session.code)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Debug code lookup failed");
                None
            }
        }
    }

    /// Reveal the code of a live session without consuming it
    ///
    /// Compiled without the `debug-codes` feature: never reveals anything.
    #[cfg(not(feature = "debug-codes"))]
    pub async fn debug_code(&self, _session_id: &str) -> Option<String> {
        None
    }

    /// Whether `debug_code` can return codes in this build and configuration
    pub fn debug_codes_available(&self) -> bool {
        cfg!(feature = "debug-codes") && self.config.debug_codes_enabled
    }

    /// Remove every expired session
    pub async fn purge_expired(&self) -> DomainResult<usize> {
        self.session_store
            .purge_expired(self.clock.now())
            .await
            .map_err(store_error)
    }

    /// Number of sessions currently held by the store
    pub async fn live_sessions(&self) -> DomainResult<usize> {
        self.session_store.len().await.map_err(store_error)
    }

    /// Admission limits for a session issued at `now`
    fn insert_limits(&self, now: DateTime<Utc>) -> InsertLimits {
        InsertLimits {
            max_live_sessions: self.config.max_live_sessions,
            cooldown_cutoff: self
                .config
                .enforce_resend_cooldown
                .then(|| now - Duration::seconds(self.config.resend_cooldown_seconds)),
        }
    }

    async fn store_session(
        &self,
        mut session: VerificationSession,
        masked_phone: &str,
    ) -> DomainResult<VerificationSession> {
        let now = session.created_at;
        let limits = self.insert_limits(now);

        for _ in 0..MAX_SESSION_ID_ATTEMPTS {
            match self.session_store.insert(session.clone(), limits).await {
                Ok(()) => return Ok(session),
                Err(SessionStoreError::Duplicate(id)) => {
                    tracing::warn!(
                        session_id = %id,
                        "Session identifier collision, drawing a new one"
                    );
                    session = session.with_fresh_id();
                }
                Err(SessionStoreError::CooldownActive { latest_created_at }) => {
                    let elapsed = (now - latest_created_at).num_seconds().max(0);
                    let remaining = (self.config.resend_cooldown_seconds - elapsed).max(1);
                    tracing::warn!(
                        phone = %masked_phone,
                        cooldown_remaining = remaining,
                        event = "rate_limit_exceeded",
                        "Verification code requested inside the resend cooldown"
                    );
                    return Err(DomainError::RateLimited {
                        retry_after_seconds: remaining,
                    });
                }
                Err(SessionStoreError::Full { limit }) => {
                    tracing::error!(
                        limit,
                        event = "session_capacity_exceeded",
                        "Session store is full"
                    );
                    return Err(DomainError::CapacityExceeded { limit });
                }
                Err(e) => return Err(store_error(e)),
            }
        }

        Err(DomainError::Internal {
            message: "Could not allocate a unique session identifier".to_string(),
        })
    }
}

fn store_error(error: SessionStoreError) -> DomainError {
    DomainError::SessionStore {
        message: error.to_string(),
    }
}
