//! Result of checking a submitted code against a verification session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive outcomes of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// No live session for the identifier (never issued, consumed, or evicted)
    NotFound,
    /// The session existed but its expiry had passed; it has been removed
    Expired,
    /// The code did not match; the session stays usable until it expires
    Mismatch,
    /// The code matched; the session has been consumed
    Verified,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }

    /// Whether the caller should go back and request a new code
    pub fn requires_new_code(&self) -> bool {
        matches!(self, VerificationOutcome::NotFound | VerificationOutcome::Expired)
    }

    /// Stable machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationOutcome::NotFound => "not_found",
            VerificationOutcome::Expired => "expired",
            VerificationOutcome::Mismatch => "mismatch",
            VerificationOutcome::Verified => "verified",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
