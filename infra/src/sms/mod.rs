//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes. It includes a mock implementation for development and Twilio for
//! production delivery.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Log output and simulated latency for development
//! - **Twilio Support**: Production SMS via the Twilio REST API
//! - **Adapter**: Exposes any provider through the core SMS trait

use std::time::Duration;
use tf_shared::config::{SmsConfig, SmsProvider};

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::{verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Returns the provider named in the configuration, falling back to the mock
/// provider when that provider cannot be built.
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
/// * `code_validity_minutes` - Expiry window quoted in verification messages
pub fn create_sms_service(config: &SmsConfig, code_validity_minutes: i64) -> Box<dyn SmsService> {
    match config.provider {
        SmsProvider::Mock => Box::new(mock_service(config, code_validity_minutes)),
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            match TwilioConfig::from_sms_config(config).and_then(TwilioSmsService::new) {
                Ok(service) => Box::new(service.with_code_validity(code_validity_minutes)),
                Err(e) => {
                    tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Box::new(mock_service(config, code_validity_minutes))
                }
            }
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => {
            tracing::warn!("Twilio support is not compiled in, using mock implementation");
            Box::new(mock_service(config, code_validity_minutes))
        }
    }
}

fn mock_service(config: &SmsConfig, code_validity_minutes: i64) -> MockSmsService {
    MockSmsService::new()
        .with_latency(Duration::from_millis(config.simulated_latency_ms))
        .with_code_validity(code_validity_minutes)
}
