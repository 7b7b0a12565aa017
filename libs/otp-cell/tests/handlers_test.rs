use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use otp_cell::{otp_routes, InMemoryOtpStore, LogOnlySender, OtpService};

fn create_test_app() -> Router {
    let service = OtpService::new(Arc::new(InMemoryOtpStore::new()), Arc::new(LogOnlySender));
    otp_routes(Arc::new(service))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_issue_does_not_return_code() {
    let app = create_test_app();
    let appointment = Uuid::new_v4();

    let (status, body) = post_json(&app, "/issue", json!({
        "appointment_id": appointment,
        "phone": "0771234567"
    })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["issued"], true);
    assert_eq!(body["appointment_id"], json!(appointment));
    assert!(body["expires_at"].is_string());
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn test_issue_with_invalid_phone_is_bad_request() {
    let app = create_test_app();

    let (status, body) = post_json(&app, "/issue", json!({
        "appointment_id": Uuid::new_v4(),
        "phone": "not a number"
    })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_verify_unknown_code_is_generic_rejection() {
    let app = create_test_app();

    let (status, body) = post_json(&app, "/verify", json!({
        "appointment_id": Uuid::new_v4(),
        "code": "123456",
        "phone": "0771234567"
    })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false, "reason": "invalid_or_expired" }));
}

#[tokio::test]
async fn test_issue_and_verify_through_service_state() {
    let store = Arc::new(InMemoryOtpStore::new());
    let service = Arc::new(OtpService::new(store.clone(), Arc::new(LogOnlySender)));
    let app = otp_routes(service.clone());
    let appointment = Uuid::new_v4();

    // Issue directly so the test knows the code the handler would have sent.
    let issued = service.issue(appointment, "0771234567").await.unwrap();

    let (status, body) = post_json(&app, "/verify", json!({
        "appointment_id": appointment,
        "code": issued.code,
        "phone": "0771234567"
    })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true }));
}

#[tokio::test]
async fn test_verify_with_missing_fields_is_client_error() {
    let app = create_test_app();

    let (status, _) = post_json(&app, "/verify", json!({ "code": "123456" })).await;
    assert!(status.is_client_error());
}
