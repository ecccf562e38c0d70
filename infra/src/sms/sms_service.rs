//! SMS Service Trait
//!
//! Common interface for every SMS provider plus the verification message
//! text sent to users.

use async_trait::async_trait;
use tf_core::domain::DEFAULT_EXPIRATION_MINUTES;

use crate::InfrastructureError;

/// Common interface for SMS providers
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a text message, returning the provider message ID
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard message text
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let message = verification_message(code, self.code_validity_minutes());
        self.send_sms(phone_number, &message).await
    }

    /// Minutes a code stays valid, quoted in the message text
    fn code_validity_minutes(&self) -> i64 {
        DEFAULT_EXPIRATION_MINUTES
    }

    /// Human-readable provider name
    fn provider_name(&self) -> &str;
}

/// Text of the verification SMS
pub fn verification_message(code: &str, validity_minutes: i64) -> String {
    format!(
        "קוד האימות שלך הוא: {}. הקוד בתוקף ל-{} דקות.",
        code, validity_minutes
    )
}
