//! Configuration for the verification service

use tf_shared::config::VerificationConfig;

use crate::domain::entities::verification_session::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code requests for the same phone number
    pub resend_cooldown_seconds: i64,
    /// Reject requests that arrive inside the cooldown instead of only hinting it
    pub enforce_resend_cooldown: bool,
    /// Remove older live sessions of a phone number once a new code is delivered
    pub supersede_previous_sessions: bool,
    /// Maximum number of live sessions (0 = unbounded)
    pub max_live_sessions: usize,
    /// Runtime gate for the debug code accessor
    pub debug_codes_enabled: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 120,
            enforce_resend_cooldown: false,
            supersede_previous_sessions: false,
            max_live_sessions: 10_000,
            debug_codes_enabled: false,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            enforce_resend_cooldown: config.enforce_resend_cooldown,
            supersede_previous_sessions: config.supersede_previous_sessions,
            max_live_sessions: config.max_live_sessions,
            debug_codes_enabled: false,
        }
    }
}

impl VerificationServiceConfig {
    /// Enable or disable the debug code accessor at runtime
    pub fn with_debug_codes(mut self, enabled: bool) -> Self {
        self.debug_codes_enabled = enabled;
        self
    }
}
