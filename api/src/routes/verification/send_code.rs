use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use validator::Validate;

use tf_core::services::verification::{SessionStore, SmsServiceTrait};
use tf_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::i18n::{get_message, language_from_request};

use super::AppState;

/// Handler for POST /api/v1/verification/send-code
///
/// Issues a verification session and sends its code to the phone number.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "0501234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "sessionId": "session-1700000000000-k3j9x2a",
///     "message": "קוד אימות נשלח בהצלחה",
///     "expiresIn": 600,
///     "resendAfter": 120
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Phone number does not have 10 to 15 digits
/// - 429 Too Many Requests: Resend cooldown enforced and not yet elapsed
/// - 502 Bad Gateway: SMS delivery failed
/// - 503 Service Unavailable: Too many live sessions
pub async fn send_code<S, T>(
    req: HttpRequest,
    state: web::Data<AppState<S, T>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    let lang = language_from_request(&req);

    if request.validate().is_err() {
        tracing::warn!(
            phone = %mask_phone_number(&request.phone_number),
            "Rejected send_code request with invalid phone number"
        );
        return validation_error_response("invalid_phone", lang);
    }

    let phone = normalize_phone_number(&request.phone_number);

    match state.verification_service.request_code(&phone).await {
        Ok(result) => {
            let now = Utc::now();
            let expires_in = (result.expires_at - now).num_seconds().max(0);
            let resend_after = (result.next_resend_at - now).num_seconds().max(0);

            tracing::info!(
                phone = %mask_phone_number(&phone),
                session_id = %result.session_id,
                message_id = %result.message_id,
                "Verification code sent"
            );

            HttpResponse::Ok().json(SendCodeResponse {
                success: true,
                session_id: Some(result.session_id.into_inner()),
                message: get_message("verification", "code_sent", lang),
                expires_in: Some(expires_in),
                resend_after: Some(resend_after),
            })
        }
        Err(error) => handle_domain_error(&error, "code_send_failed", lang),
    }
}
