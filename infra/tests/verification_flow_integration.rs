//! Integration tests wiring the real session store and SMS adapter into the
//! verification service

use std::sync::Arc;

use tf_core::domain::VerificationOutcome;
use tf_core::errors::DomainError;
use tf_core::services::verification::{
    SessionSweeper, SweeperConfig, VerificationService, VerificationServiceConfig,
};
use tf_infra::sms::{create_sms_service, SmsService};
use tf_infra::{InMemorySessionStore, MockSmsService, SmsServiceAdapter};
use tf_shared::config::SmsConfig;

type Service = VerificationService<SmsServiceAdapter, InMemorySessionStore>;

fn build_service(provider: Box<dyn SmsService>, config: VerificationServiceConfig) -> Service {
    VerificationService::new(
        Arc::new(SmsServiceAdapter::new(provider)),
        Arc::new(InMemorySessionStore::new()),
        config,
    )
}

#[tokio::test]
async fn test_complete_sms_workflow() {
    let sms_config = SmsConfig {
        simulated_latency_ms: 0,
        ..SmsConfig::default()
    };
    let provider = create_sms_service(&sms_config, 10);
    let service = build_service(provider, VerificationServiceConfig::default());

    let sent = service.request_code("050-123-4567").await.unwrap();
    assert!(sent.message_id.starts_with("mock_"));

    let outcome = service
        .verify_code(sent.session_id.as_str(), &sent.code)
        .await
        .unwrap();
    assert_eq!(outcome, VerificationOutcome::Verified);

    let outcome = service
        .verify_code(sent.session_id.as_str(), &sent.code)
        .await
        .unwrap();
    assert_eq!(outcome, VerificationOutcome::NotFound);
}

#[tokio::test]
async fn test_delivery_failure_leaves_no_session() {
    let provider = Box::new(MockSmsService::with_options(false, true));
    let service = build_service(provider, VerificationServiceConfig::default());

    let result = service.request_code("0501234567").await;
    assert!(matches!(result, Err(DomainError::SmsDelivery { .. })));
    assert_eq!(service.live_sessions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_supersede_with_real_store() {
    let config = VerificationServiceConfig {
        supersede_previous_sessions: true,
        ..Default::default()
    };
    let service = build_service(Box::new(MockSmsService::with_options(false, false)), config);

    let first = service.request_code("0501234567").await.unwrap();
    let second = service.request_code("0501234567").await.unwrap();

    assert_eq!(service.live_sessions().await.unwrap(), 1);
    assert_eq!(
        service.verify_code(first.session_id.as_str(), &first.code).await.unwrap(),
        VerificationOutcome::NotFound
    );
    assert_eq!(
        service.verify_code(second.session_id.as_str(), &second.code).await.unwrap(),
        VerificationOutcome::Verified
    );
}

#[tokio::test]
async fn test_sweeper_on_real_store() {
    let config = VerificationServiceConfig {
        code_expiration_minutes: 0,
        ..Default::default()
    };
    let service = Arc::new(build_service(
        Box::new(MockSmsService::with_options(false, false)),
        config,
    ));

    service.request_code("0501234567").await.unwrap();
    // Zero-minute sessions expire as soon as the clock moves on
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let sweeper = SessionSweeper::new(service.clone(), SweeperConfig::default());
    let result = sweeper.run_once().await.unwrap();
    assert_eq!(result.expired_sessions_removed, 1);
    assert_eq!(result.live_sessions, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_session_cap_holds_under_concurrent_requests() {
    let config = VerificationServiceConfig {
        max_live_sessions: 5,
        ..Default::default()
    };
    let provider = MockSmsService::with_options(false, false)
        .with_latency(std::time::Duration::from_millis(50));
    let service = Arc::new(build_service(Box::new(provider), config));

    let mut handles = Vec::new();
    for i in 0..400 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.request_code(&format!("0521{:06}", i)).await
        }));
    }

    let mut issued = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => issued += 1,
            Err(DomainError::CapacityExceeded { .. }) => rejected += 1,
            Err(other) => panic!("Unexpected error {:?}", other),
        }
    }
    assert_eq!(issued, 5);
    assert_eq!(rejected, 395);
    assert_eq!(service.live_sessions().await.unwrap(), 5);
}

#[cfg(feature = "twilio-sms")]
#[tokio::test]
async fn test_twilio_failure_surfaces_as_delivery_error() {
    use tf_infra::sms::{TwilioConfig, TwilioSmsService};
    use tf_shared::config::SmsProvider;

    let sms_config = SmsConfig {
        provider: SmsProvider::Twilio,
        api_key: "ACtest".to_string(),
        api_secret: "secret".to_string(),
        from_number: "+15551234567".to_string(),
        simulated_latency_ms: 0,
    };
    let twilio_config = TwilioConfig {
        max_retries: 1,
        retry_delay_ms: 0,
        request_timeout_secs: 2,
        api_base: "http://127.0.0.1:1".to_string(),
        ..TwilioConfig::from_sms_config(&sms_config).unwrap()
    };
    let provider = Box::new(TwilioSmsService::new(twilio_config).unwrap());
    let service = build_service(provider, VerificationServiceConfig::default());

    let result = service.request_code("0501234567").await;
    assert!(matches!(result, Err(DomainError::SmsDelivery { .. })));
    assert_eq!(service.live_sessions().await.unwrap(), 0);
}
