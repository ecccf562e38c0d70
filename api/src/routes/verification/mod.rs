//! Phone verification route handlers
//!
//! This module contains the endpoints the story wizard calls before story
//! creation:
//! - Sending a verification code to a phone number
//! - Verifying a submitted code
//! - Revealing a code in development builds (no real SMS channel)

use std::sync::Arc;

use tf_core::services::verification::{SessionStore, SmsServiceTrait, VerificationService};
use tf_shared::config::Environment;

#[cfg(feature = "debug-codes")]
pub mod debug_code;
pub mod send_code;
pub mod verify_code;

/// Application state that holds shared services
pub struct AppState<S, T>
where
    S: SmsServiceTrait,
    T: SessionStore,
{
    pub verification_service: Arc<VerificationService<S, T>>,
    pub environment: Environment,
}

impl<S, T> AppState<S, T>
where
    S: SmsServiceTrait,
    T: SessionStore,
{
    pub fn new(
        verification_service: Arc<VerificationService<S, T>>,
        environment: Environment,
    ) -> Self {
        Self {
            verification_service,
            environment,
        }
    }
}
