//! Phone verification policy configuration

use serde::{Deserialize, Serialize};

use super::{flag_or, parse_or};

/// Policy knobs for the verification session manager
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    pub code_expiration_minutes: i64,

    /// Seconds the client should wait before asking for a new code
    pub resend_cooldown_seconds: i64,

    /// Reject resend requests that arrive inside the cooldown
    #[serde(default)]
    pub enforce_resend_cooldown: bool,

    /// Drop older live sessions of a phone number when a new code is issued
    #[serde(default)]
    pub supersede_previous_sessions: bool,

    /// Upper bound on live sessions held in memory
    pub max_live_sessions: usize,

    /// Period of the expired-session sweeper (0 disables it)
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 10,
            resend_cooldown_seconds: 120,
            enforce_resend_cooldown: false,
            supersede_previous_sessions: false,
            max_live_sessions: 10_000,
            sweep_interval_seconds: 60,
        }
    }
}

impl VerificationConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let code_expiration_minutes = parse_or(
            lookup,
            "VERIFICATION_CODE_EXPIRY_MINUTES",
            defaults.code_expiration_minutes,
        );

        Self {
            code_expiration_minutes: if code_expiration_minutes > 0 {
                code_expiration_minutes
            } else {
                defaults.code_expiration_minutes
            },
            resend_cooldown_seconds: parse_or(
                lookup,
                "VERIFICATION_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            )
            .max(0),
            enforce_resend_cooldown: flag_or(
                lookup,
                "VERIFICATION_ENFORCE_RESEND_COOLDOWN",
                defaults.enforce_resend_cooldown,
            ),
            supersede_previous_sessions: flag_or(
                lookup,
                "VERIFICATION_SUPERSEDE_PREVIOUS",
                defaults.supersede_previous_sessions,
            ),
            max_live_sessions: parse_or(
                lookup,
                "VERIFICATION_MAX_LIVE_SESSIONS",
                defaults.max_live_sessions,
            ),
            sweep_interval_seconds: parse_or(
                lookup,
                "VERIFICATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }
}
