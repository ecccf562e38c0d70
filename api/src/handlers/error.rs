//! Conversion of domain errors into localized HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use std::collections::HashMap;
use tf_core::errors::DomainError;

use crate::dto::ErrorResponse;
use crate::i18n::{format_message, get_message, Language};

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// `fallback_key` names the `verification` message shown for faults that have
/// no dedicated text (delivery and store failures).
pub fn handle_domain_error(
    error: &DomainError,
    fallback_key: &str,
    lang: Language,
) -> HttpResponse {
    let (status, message) = match error {
        DomainError::Validation { .. } => (
            StatusCode::BAD_REQUEST,
            get_message("validation", "invalid_request", lang),
        ),
        DomainError::RateLimited { retry_after_seconds } => {
            let mut params = HashMap::new();
            params.insert("seconds", retry_after_seconds.to_string());
            (
                StatusCode::TOO_MANY_REQUESTS,
                format_message(&get_message("general", "rate_limited", lang), &params),
            )
        }
        DomainError::CapacityExceeded { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            get_message("general", "service_busy", lang),
        ),
        DomainError::SmsDelivery { .. } => (
            StatusCode::BAD_GATEWAY,
            get_message("verification", fallback_key, lang),
        ),
        DomainError::SessionStore { .. } | DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            get_message("verification", fallback_key, lang),
        ),
    };

    if status.is_server_error() {
        tracing::error!(error = %error, code = error.code(), "Request failed");
    } else {
        tracing::warn!(error = %error, code = error.code(), "Request rejected");
    }

    let mut response = ErrorResponse::new(error.code(), message).to_response(status);
    if let DomainError::RateLimited { retry_after_seconds } = error {
        let retry_after = retry_after_seconds.to_string();
        if let Ok(value) = actix_web::http::header::HeaderValue::from_str(&retry_after) {
            response
                .headers_mut()
                .insert(actix_web::http::header::RETRY_AFTER, value);
        }
    }
    response
}

/// 400 response for a request that failed input validation
pub fn validation_error_response(key: &str, lang: Language) -> HttpResponse {
    ErrorResponse::new("VALIDATION_ERROR", get_message("validation", key, lang))
        .to_response(StatusCode::BAD_REQUEST)
}
