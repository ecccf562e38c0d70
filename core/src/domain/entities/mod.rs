//! Domain entities representing core business objects.

pub mod verification_session;


// Re-export commonly used types
pub use verification_session::{
    SessionId, VerificationSession, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
};
