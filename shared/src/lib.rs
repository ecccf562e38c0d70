//! Shared utilities and common types for the TaleForge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Phone number utilities (normalization, validation, masking)
//! - Common type definitions

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, ServerConfig, CorsConfig,
    SmsConfig, VerificationConfig,
};
pub use types::Language;
pub use utils::phone;
