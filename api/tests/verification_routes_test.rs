//! End-to-end tests of the verification endpoints through `create_app`

mod common;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::{json, Value};
use tf_api::create_app;
use tf_core::services::verification::VerificationServiceConfig;
use tf_shared::config::AppConfig;

use common::{default_state, test_state, SEND_CODE, VERIFY_CODE};

#[cfg(feature = "debug-codes")]
#[actix_web::test]
async fn test_full_flow_in_hebrew() {
    let state = default_state();
    let app = test::init_service(create_app(state.clone(), &AppConfig::default())).await;

    // Request a code
    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .set_json(json!({ "phoneNumber": "050-123-4567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "קוד אימות נשלח בהצלחה");
    let session_id = body["sessionId"].as_str().unwrap().to_string();
    assert!(session_id.starts_with("session-"));
    let expires_in = body["expiresIn"].as_i64().unwrap();
    assert!((599..=600).contains(&expires_in));
    let resend_after = body["resendAfter"].as_i64().unwrap();
    assert!((119..=120).contains(&resend_after));

    let code = state
        .verification_service
        .debug_code(&session_id)
        .await
        .expect("live session has a code");

    // A wrong code leaves the session usable
    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": session_id, "code": "000000" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["verified"], false);
    assert_eq!(body["outcome"], "mismatch");
    assert_eq!(body["message"], "קוד אימות שגוי");

    // The right code verifies once
    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": session_id, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["verified"], true);
    assert_eq!(body["outcome"], "verified");
    assert_eq!(body["message"], "קוד אומת בהצלחה");

    // and is gone afterwards
    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": session_id, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["verified"], false);
    assert_eq!(body["outcome"], "not_found");
    assert_eq!(body["message"], "מזהה חיבור לא תקין או שפג תוקפו");
}

#[actix_web::test]
async fn test_send_code_rejects_invalid_phone() {
    let app = test::init_service(create_app(default_state(), &AppConfig::default())).await;

    for phone in ["050123456", "", "not a phone", "+1234567890123456"] {
        let req = test::TestRequest::post()
            .uri(SEND_CODE)
            .set_json(json!({ "phoneNumber": phone }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "phone {:?}", phone);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "מספר הטלפון חייב להכיל בין 10 ל-15 ספרות");
    }
}

#[actix_web::test]
async fn test_messages_follow_accept_language() {
    let app = test::init_service(create_app(default_state(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .insert_header((header::ACCEPT_LANGUAGE, "en-US,en;q=0.9,he;q=0.8"))
        .set_json(json!({ "phoneNumber": "123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Phone number must contain 10 to 15 digits");

    // Hebrew stays the default when English is not preferred
    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .insert_header((header::ACCEPT_LANGUAGE, "he-IL,en;q=0.5"))
        .set_json(json!({ "phoneNumber": "123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "מספר הטלפון חייב להכיל בין 10 ל-15 ספרות");

    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .insert_header((header::ACCEPT_LANGUAGE, "en"))
        .set_json(json!({ "phoneNumber": "0501234567" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Verification code sent successfully");
}

#[actix_web::test]
async fn test_verify_code_rejects_malformed_input() {
    let app = test::init_service(create_app(default_state(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": "session-1700000000000-abc1234", "code": "12ab56" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "קוד האימות חייב להכיל 6 ספרות");

    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": "", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "חסר מזהה חיבור");
}

#[actix_web::test]
async fn test_verify_unknown_session_is_not_found() {
    let app = test::init_service(create_app(default_state(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": "session-1700000000000-zzzzzzz", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["outcome"], "not_found");
}

#[actix_web::test]
async fn test_expired_session_reports_expired() {
    let config = VerificationServiceConfig {
        code_expiration_minutes: 0,
        ..Default::default()
    };
    let state = test_state(config, false);
    let app = test::init_service(create_app(state.clone(), &AppConfig::default())).await;

    let result = state
        .verification_service
        .request_code("0501234567")
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let req = test::TestRequest::post()
        .uri(VERIFY_CODE)
        .set_json(json!({ "sessionId": result.session_id.as_str(), "code": result.code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["outcome"], "expired");
    assert_eq!(body["message"], "פג תוקף קוד האימות. אנא בקש קוד חדש");
}

#[actix_web::test]
async fn test_sms_failure_returns_bad_gateway() {
    let state = test_state(VerificationServiceConfig::default(), true);
    let app = test::init_service(create_app(state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .set_json(json!({ "phoneNumber": "0501234567" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "SMS_DELIVERY_FAILED");
    assert_eq!(body["message"], "שגיאה בשליחת קוד האימות");

    assert_eq!(state.verification_service.live_sessions().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_enforced_cooldown_returns_retry_after() {
    let config = VerificationServiceConfig {
        enforce_resend_cooldown: true,
        ..Default::default()
    };
    let app =
        test::init_service(create_app(test_state(config, false), &AppConfig::default())).await;

    let send = || {
        test::TestRequest::post()
            .uri(SEND_CODE)
            .set_json(json!({ "phoneNumber": "0501234567" }))
            .to_request()
    };

    let resp = test::call_service(&app, send()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, send()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: i64 = resp
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap();
    assert!((119..=120).contains(&retry_after));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "RATE_LIMITED");
}

#[actix_web::test]
async fn test_formatting_variants_share_a_phone_number() {
    let config = VerificationServiceConfig {
        enforce_resend_cooldown: true,
        ..Default::default()
    };
    let app =
        test::init_service(create_app(test_state(config, false), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .set_json(json!({ "phoneNumber": "050-123-4567" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(SEND_CODE)
        .set_json(json!({ "phoneNumber": "050 123 4567" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[cfg(feature = "debug-codes")]
mod debug_codes {
    use super::*;

    #[actix_web::test]
    async fn test_debug_code_endpoint_reveals_live_code() {
        let state = default_state();
        let app = test::init_service(create_app(state.clone(), &AppConfig::default())).await;

        let result = state
            .verification_service
            .request_code("0501234567")
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/verification/debug-code/{}", result.session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["sessionId"], result.session_id.as_str());
        assert_eq!(body["code"], result.code.as_str());

        // Reading the code does not consume the session
        assert_eq!(state.verification_service.live_sessions().await.unwrap(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/verification/debug-code/session-1-missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "אין קוד זמין עבור מזהה החיבור");
    }

    #[actix_web::test]
    async fn test_debug_code_endpoint_absent_when_disabled() {
        let state = test_state(VerificationServiceConfig::default(), false);
        let app = test::init_service(create_app(state.clone(), &AppConfig::default())).await;

        let result = state
            .verification_service
            .request_code("0501234567")
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/verification/debug-code/{}", result.session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
