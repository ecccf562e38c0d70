//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TaleForge
//! verification backend. It provides concrete implementations of the seams
//! declared by `tf_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: the in-memory live-session store
//! - **SMS**: SMS provider integrations (mock, Twilio) and the adapter onto
//!   the core SMS trait
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS provider (default)

/// Cache module - In-memory session storage
pub mod cache;

/// SMS service module - External SMS providers
pub mod sms;

pub use cache::InMemorySessionStore;
pub use sms::{create_sms_service, MockSmsService, SmsService, SmsServiceAdapter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
