use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use tf_core::services::verification::{SessionStore, SmsServiceTrait};

use crate::dto::{DebugCodeResponse, ErrorResponse};
use crate::i18n::{get_message, language_from_request};

use super::AppState;

/// Handler for GET /api/v1/verification/debug-code/{session_id}
///
/// Development-only: returns the code of a live session without consuming it.
/// Only registered when the `debug-codes` feature is compiled in and the
/// environment is not production.
pub async fn debug_code<S, T>(
    req: HttpRequest,
    state: web::Data<AppState<S, T>>,
    path: web::Path<String>,
) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    let session_id = path.into_inner();

    match state.verification_service.debug_code(&session_id).await {
        Some(code) => HttpResponse::Ok().json(DebugCodeResponse { session_id, code }),
        None => {
            let lang = language_from_request(&req);
            ErrorResponse::new(
                "NOT_FOUND",
                get_message("verification", "debug_code_unavailable", lang),
            )
            .to_response(StatusCode::NOT_FOUND)
        }
    }
}
