use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tf_api::{create_app, AppState};
use tf_core::services::verification::{
    SessionSweeper, SweeperConfig, VerificationService, VerificationServiceConfig,
};
use tf_infra::{create_sms_service, InMemorySessionStore, SmsServiceAdapter};
use tf_shared::config::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting TaleForge API Server"
    );

    // SMS provider and session store
    let sms_provider = create_sms_service(&config.sms, config.verification.code_expiration_minutes);
    tracing::info!(provider = sms_provider.provider_name(), "SMS provider configured");

    let sms_service = Arc::new(SmsServiceAdapter::new(sms_provider));
    let session_store = Arc::new(InMemorySessionStore::new());

    let service_config = VerificationServiceConfig::from(&config.verification)
        .with_debug_codes(config.allows_debug_helpers());
    let verification_service = Arc::new(VerificationService::new(
        sms_service,
        session_store,
        service_config,
    ));

    // Evict sessions that are never checked again
    let sweeper = Arc::new(SessionSweeper::new(
        verification_service.clone(),
        SweeperConfig::from_interval(config.verification.sweep_interval_seconds),
    ));
    let sweeper_handle = sweeper.start_background_task();

    let app_state = web::Data::new(AppState::new(verification_service, config.environment));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
