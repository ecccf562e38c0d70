//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider selection and credentials
//! - `verification` - Phone verification session policy

pub mod environment;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Verification session policy
    pub verification: VerificationConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = ["ENVIRONMENT", "ENV", "RUST_ENV"]
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            environment,
            server: ServerConfig::from_lookup(&lookup),
            cors: CorsConfig::from_lookup(&lookup),
            verification: VerificationConfig::from_lookup(&lookup),
            sms: SmsConfig::from_lookup(&lookup),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Whether development-only helpers (such as the debug code accessor) may be exposed
    pub fn allows_debug_helpers(&self) -> bool {
        !self.environment.is_production()
    }
}

/// Parse a value from the lookup, falling back to `default` when missing or invalid
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean flag accepting `1/0`, `true/false`, `yes/no` and `on/off`
pub(crate) fn flag_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|value| value.trim().to_lowercase()) {
        Some(value) if matches!(value.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(value) if matches!(value.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.verification.code_expiration_minutes, 10);
        assert_eq!(config.sms.provider, SmsProvider::Mock);
        assert!(config.allows_debug_helpers());
    }

    #[test]
    fn test_production_disables_debug_helpers() {
        let config = AppConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "production")]));

        assert!(config.environment.is_production());
        assert!(!config.allows_debug_helpers());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_environment_fallback_keys() {
        let config = AppConfig::from_lookup(lookup_from(&[("RUST_ENV", "staging")]));
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("VERIFICATION_CODE_EXPIRY_MINUTES", "-"),
        ]));

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.verification.code_expiration_minutes, 10);
    }

    #[test]
    fn test_flag_parsing() {
        let lookup = lookup_from(&[("A", "yes"), ("B", "OFF"), ("C", "maybe")]);
        assert!(flag_or(&lookup, "A", false));
        assert!(!flag_or(&lookup, "B", true));
        assert!(flag_or(&lookup, "C", true));
        assert!(!flag_or(&lookup, "MISSING", false));
    }
}
