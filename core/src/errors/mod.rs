//! Domain-specific error types and error handling.
//!
//! Verification outcomes (wrong code, expired session, unknown session) are
//! values, not errors. The variants below cover invalid input, policy
//! rejections, and faults of the collaborating services.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resend requested too early, retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Too many live verification sessions (limit {limit})")]
    CapacityExceeded { limit: usize },

    /// The code could not be handed to the SMS provider; no session was kept
    #[error("SMS delivery failed: {message}")]
    SmsDelivery { message: String },

    #[error("Session store error: {message}")]
    SessionStore { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::RateLimited { .. } => "RATE_LIMITED",
            DomainError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            DomainError::SmsDelivery { .. } => "SMS_DELIVERY_FAILED",
            DomainError::SessionStore { .. } => "SESSION_STORE_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
