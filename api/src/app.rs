//! Application factory
//!
//! This module builds the Actix-web application: middleware, the
//! verification routes, health check and the JSON/404 fallbacks.

use actix_web::{
    error::InternalError, http::StatusCode, web, App, HttpRequest, HttpResponse, Scope,
};
use tracing_actix_web::TracingLogger;

use tf_core::services::verification::{SessionStore, SmsServiceTrait};
use tf_shared::config::AppConfig;

use crate::dto::ErrorResponse;
use crate::i18n::{get_message, language_from_request};
use crate::middleware::cors::create_cors;
use crate::routes::verification::{send_code::send_code, verify_code::verify_code, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, T>(
    app_state: web::Data<AppState<S, T>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    let cors = create_cors(config.environment, &config.cors);
    let debug_codes = app_state.verification_service.debug_codes_available();

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, req| {
            tracing::warn!(error = %err, "Rejected malformed JSON payload");
            let response = invalid_request_response(req);
            InternalError::from_response(err, response).into()
        });

    let verification = web::scope("/api/v1/verification")
        .route("/send-code", web::post().to(send_code::<S, T>))
        .route("/verify-code", web::post().to(verify_code::<S, T>));

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Middleware order: CORS runs first, then request tracing
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check::<S, T>))
        .service(with_debug_routes::<S, T>(verification, debug_codes))
        .default_service(web::route().to(not_found))
}

#[cfg(feature = "debug-codes")]
fn with_debug_routes<S, T>(scope: Scope, enabled: bool) -> Scope
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    use crate::routes::verification::debug_code::debug_code;

    if enabled {
        tracing::warn!("Debug code endpoint enabled; do not expose this build publicly");
        scope.route("/debug-code/{session_id}", web::get().to(debug_code::<S, T>))
    } else {
        scope
    }
}

#[cfg(not(feature = "debug-codes"))]
fn with_debug_routes<S, T>(scope: Scope, _enabled: bool) -> Scope
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    scope
}

/// Health check endpoint handler
async fn health_check<S, T>(state: web::Data<AppState<S, T>>) -> HttpResponse
where
    S: SmsServiceTrait + 'static,
    T: SessionStore + 'static,
{
    let live_sessions = state.verification_service.live_sessions().await.ok();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "taleforge-api",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.to_string(),
        "liveSessions": live_sessions,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn invalid_request_response(req: &HttpRequest) -> HttpResponse {
    let lang = language_from_request(req);
    ErrorResponse::new(
        "VALIDATION_ERROR",
        get_message("validation", "invalid_request", lang),
    )
    .to_response(StatusCode::BAD_REQUEST)
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = language_from_request(&req);
    ErrorResponse::new("NOT_FOUND", get_message("general", "not_found", lang))
        .to_response(StatusCode::NOT_FOUND)
}
