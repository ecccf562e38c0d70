//! Mock SMS Service
//!
//! Development provider that logs messages instead of sending them. It can
//! add an artificial delay to stand in for network latency, and can be told
//! to fail so callers can exercise delivery errors.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tf_core::domain::DEFAULT_EXPIRATION_MINUTES;
use tf_shared::utils::phone::{is_valid_phone_number, mask_phone_number};
use tracing::{debug, info, warn};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// SMS provider that never leaves the process
pub struct MockSmsService {
    message_count: AtomicU64,
    simulate_failure: bool,
    console_output: bool,
    latency: Duration,
    code_validity_minutes: i64,
}

impl MockSmsService {
    /// Create a mock provider with console output and no latency
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock provider with explicit output and failure behaviour
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: AtomicU64::new(0),
            simulate_failure,
            console_output,
            latency: Duration::ZERO,
            code_validity_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Delay every send by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Minutes quoted in verification messages
    pub fn with_code_validity(mut self, minutes: i64) -> Self {
        self.code_validity_minutes = minutes;
        self
    }

    /// Number of messages accepted so far
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_phone_number(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone_number(phone_number)
            )));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.simulate_failure {
            warn!(
                phone = %mask_phone_number(phone_number),
                "Mock SMS provider simulating a delivery failure"
            );
            return Err(InfrastructureError::Sms("Simulated SMS failure".to_string()));
        }

        let message_id = format!("mock_{}", uuid::Uuid::new_v4());
        let sent_total = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            info!(
                phone = %mask_phone_number(phone_number),
                message_id = %message_id,
                sent_total,
                "Mock SMS accepted"
            );
        }
        // Message text carries the code
        debug!(message_id = %message_id, body = message, "Mock SMS body");

        Ok(message_id)
    }

    fn code_validity_minutes(&self) -> i64 {
        self.code_validity_minutes
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
