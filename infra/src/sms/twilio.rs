//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Messages REST API using `reqwest`.
//!
//! ## Features
//!
//! - E.164 normalization of local Israeli numbers
//! - Automatic retry with exponential backoff on throttling and server errors
//! - No retry on client errors
//! - Phone number masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tf_core::domain::DEFAULT_EXPIRATION_MINUTES;
use tf_shared::config::SmsConfig;
use tf_shared::utils::phone::{is_valid_phone_number, mask_phone_number, to_e164};
use tracing::{debug, error, info, warn};

use crate::{sms::sms_service::SmsService, InfrastructureError};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio limit on a single message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts for one message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// API base URL
    pub api_base: String,
}

impl TwilioConfig {
    /// Build from the generic SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "SMS_API_KEY, SMS_API_SECRET and SMS_FROM_NUMBER must be set for Twilio"
                    .to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "SMS_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.api_key.clone(),
            auth_token: config.api_secret.clone(),
            from_number: config.from_number.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
            api_base: TWILIO_API_BASE.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.api_base, self.account_sid)
    }
}

#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    sid: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    code: Option<i64>,
    message: Option<String>,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
    code_validity_minutes: i64,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self {
            client,
            config,
            code_validity_minutes: DEFAULT_EXPIRATION_MINUTES,
        })
    }

    /// Minutes quoted in verification messages
    pub fn with_code_validity(mut self, minutes: i64) -> Self {
        self.code_validity_minutes = minutes;
        self
    }

    fn validate_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        if !is_valid_phone_number(phone) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_phone_number(phone)
            )));
        }
        Ok(to_e164(phone))
    }

    async fn send_once(
        &self,
        to: &str,
        message: &str,
    ) -> Result<Result<String, (bool, String)>, InfrastructureError> {
        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SendSmsResponse = response.json().await?;
            debug!(sid = %body.sid, status = ?body.status, "Twilio accepted message");
            return Ok(Ok(body.sid));
        }

        let detail = match response.json::<TwilioErrorResponse>().await {
            Ok(err) => format!(
                "{} (code {})",
                err.message.unwrap_or_else(|| status.to_string()),
                err.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
            ),
            Err(_) => status.to_string(),
        };
        let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
        Ok(Err((retryable, detail)))
    }

    /// Send SMS with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let (retryable, detail) = match self.send_once(to, message).await {
                Ok(Ok(sid)) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        sid
                    );
                    return Ok(sid);
                }
                Ok(Err(failure)) => failure,
                // Transport errors are worth another try
                Err(e) => (true, e.to_string()),
            };

            error!(
                "Failed to send SMS (attempt {}/{}): {}",
                attempts, self.config.max_retries, detail
            );

            if !retryable {
                return Err(InfrastructureError::Sms(format!("Invalid request: {}", detail)));
            }
            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    self.config.max_retries, detail
                )));
            }

            warn!("Retrying SMS delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let to = Self::validate_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&to),
            message.chars().count()
        );

        self.send_with_retry(&to, message).await
    }

    fn code_validity_minutes(&self) -> i64 {
        self.code_validity_minutes
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
