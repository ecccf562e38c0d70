//! CORS middleware configuration for cross-origin requests.
//!
//! The story wizard is served from a different origin than the API. Outside
//! production any origin may call the API; in production only the configured
//! origins may.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tf_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

/// Permissive configuration for local development and staging.
fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age)
}

/// Restrictive configuration allowing only `CORS_ALLOWED_ORIGINS`.
fn create_production_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            tracing::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allowed_origins.is_empty() {
        tracing::warn!("No CORS origins configured; cross-origin requests will be rejected");
    }

    cors
}
