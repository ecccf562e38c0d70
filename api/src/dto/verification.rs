use serde::{Deserialize, Serialize};
use tf_core::domain::CODE_LENGTH;
use tf_shared::utils::phone::is_valid_phone_number;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeRequest {
    /// Local ("050-123-4567") or international ("+972501234567") number;
    /// formatting characters are ignored, 10 to 15 digits are required
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 64))]
    pub session_id: String,

    /// 6-digit verification code
    #[validate(custom = "validate_code")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
    /// Seconds until the session expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Seconds until another code may be requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resend_after: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub message: String,
    /// One of `verified`, `mismatch`, `expired`, `not_found`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugCodeResponse {
    pub session_id: String,
    pub code: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_code"))
    }
}
