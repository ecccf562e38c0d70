use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tf_core::domain::VerificationOutcome;
use tf_core::services::verification::{SessionStore, SmsServiceTrait};

use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::i18n::{get_message, language_from_request, Language};

use super::AppState;

/// Handler for POST /api/v1/verification/verify-code
///
/// Checks a submitted code against a verification session. Every outcome is
/// a normal 200 response; `outcome` tells the client whether to retry the
/// code (`mismatch`) or go back and request a new one (`expired`, `not_found`).
///
/// # Request Body
///
/// ```json
/// { "sessionId": "session-1700000000000-k3j9x2a", "code": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "verified": true,
///     "message": "קוד אומת בהצלחה",
///     "outcome": "verified"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing session identifier or malformed code
/// - 500 Internal Server Error: Session store failure
pub async fn verify_code<S, T>(
    req: HttpRequest,
    state: web::Data<AppState<S, T>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    let lang = language_from_request(&req);

    if let Err(errors) = request.validate() {
        let key = if errors.field_errors().contains_key("session_id") {
            "invalid_session"
        } else {
            "invalid_code"
        };
        tracing::warn!(session_id = %request.session_id, "Rejected verify_code request: {}", key);
        return validation_error_response(key, lang);
    }

    match state
        .verification_service
        .verify_code(&request.session_id, &request.code)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome_response(outcome, lang)),
        Err(error) => handle_domain_error(&error, "verify_failed", lang),
    }
}

/// Map a verification outcome to the response shown by the UI
pub fn outcome_response(outcome: VerificationOutcome, lang: Language) -> VerifyCodeResponse {
    let (success, verified, key) = match outcome {
        VerificationOutcome::Verified => (true, true, "code_verified"),
        VerificationOutcome::Mismatch => (true, false, "code_mismatch"),
        VerificationOutcome::Expired => (false, false, "code_expired"),
        VerificationOutcome::NotFound => (false, false, "session_not_found"),
    };

    VerifyCodeResponse {
        success,
        verified: Some(verified),
        message: get_message("verification", key, lang),
        outcome: Some(outcome.as_str().to_string()),
    }
}
