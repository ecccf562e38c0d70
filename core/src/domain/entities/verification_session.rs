//! Verification session entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification sessions (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Length of the random suffix appended to session identifiers
const SESSION_SUFFIX_LENGTH: usize = 7;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier of one outstanding verification attempt
///
/// Formatted as `session-{unix_millis}-{random base36 suffix}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new identifier for a session issued at `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut rng = OsRng;
        let suffix: String = (0..SESSION_SUFFIX_LENGTH)
            .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
            .collect();
        Self(format!("session-{}-{}", now.timestamp_millis(), suffix))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One outstanding phone verification attempt
///
/// A session never changes after it has been issued; it is either consumed by
/// a successful verification or dropped once it is found expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Unique identifier for the session
    pub session_id: SessionId,

    /// Phone number the code was sent to
    pub phone_number: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the session was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the session is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Issue a new session with a fresh identifier and code
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The destination of the code
    /// * `now` - Issuance time
    /// * `expiration_minutes` - Lifetime of the session
    pub fn issue(
        phone_number: impl Into<String>,
        now: DateTime<Utc>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            session_id: SessionId::generate(now),
            phone_number: phone_number.into(),
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generate a 6-digit code uniformly over `[100000, 999999]` using the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Replace the identifier, keeping code and timestamps
    ///
    /// Used when the store reports an identifier collision before insertion.
    pub fn with_fresh_id(mut self) -> Self {
        self.session_id = SessionId::generate(self.created_at);
        self
    }

    /// Checks if the session has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Full-string comparison of a submitted code against the stored one
    pub fn matches(&self, submitted_code: &str) -> bool {
        self.code.len() == submitted_code.len()
            && constant_time_eq(self.code.as_bytes(), submitted_code.as_bytes())
    }
}
