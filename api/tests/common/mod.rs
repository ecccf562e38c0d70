//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use tf_api::AppState;
use tf_core::services::verification::{VerificationService, VerificationServiceConfig};
use tf_infra::{InMemorySessionStore, MockSmsService, SmsServiceAdapter};
use tf_shared::config::Environment;

pub type TestState = AppState<SmsServiceAdapter, InMemorySessionStore>;

pub const SEND_CODE: &str = "/api/v1/verification/send-code";
pub const VERIFY_CODE: &str = "/api/v1/verification/verify-code";

/// Application state backed by the in-memory store and a silent mock provider
pub fn test_state(config: VerificationServiceConfig, sms_fails: bool) -> web::Data<TestState> {
    let sms = Arc::new(SmsServiceAdapter::new(Box::new(MockSmsService::with_options(
        false, sms_fails,
    ))));
    let store = Arc::new(InMemorySessionStore::new());
    let service = Arc::new(VerificationService::new(sms, store, config));

    web::Data::new(AppState::new(service, Environment::Development))
}

/// State with the default policy and the debug accessor enabled
pub fn default_state() -> web::Data<TestState> {
    test_state(VerificationServiceConfig::default().with_debug_codes(true), false)
}
