//! SMS Service Trait Adapter
//!
//! Implements the core `SmsServiceTrait` for any infrastructure
//! `SmsService`, bridging provider implementations with the domain seam.

use async_trait::async_trait;
use tf_core::services::verification::SmsServiceTrait;

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core SmsServiceTrait for a boxed provider
pub struct SmsServiceAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
