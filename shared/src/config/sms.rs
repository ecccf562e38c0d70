//! SMS provider configuration

use serde::{Deserialize, Serialize};

use super::parse_or;

/// Supported SMS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Logs messages instead of sending them
    #[default]
    Mock,
    /// Twilio Messages REST API
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            other => Err(format!("Unknown SMS provider: {}", other)),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider
    pub provider: SmsProvider,
    /// API credentials (Twilio account SID)
    pub api_key: String,
    /// API secret/token
    pub api_secret: String,
    /// From phone number
    pub from_number: String,
    /// Artificial delay applied by the mock provider, in milliseconds
    pub simulated_latency_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            api_key: String::new(),
            api_secret: String::new(),
            from_number: String::new(),
            simulated_latency_ms: 1000,
        }
    }
}

impl SmsConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            provider: parse_or(lookup, "SMS_PROVIDER", defaults.provider),
            api_key: lookup("SMS_API_KEY").unwrap_or_default(),
            api_secret: lookup("SMS_API_SECRET").unwrap_or_default(),
            from_number: lookup("SMS_FROM_NUMBER").unwrap_or_default(),
            simulated_latency_ms: parse_or(
                lookup,
                "SMS_SIMULATED_LATENCY_MS",
                defaults.simulated_latency_ms,
            ),
        }
    }

    /// Whether credentials are present for a real provider
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty() && !self.from_number.is_empty()
    }
}
