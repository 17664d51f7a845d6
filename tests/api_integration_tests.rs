use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use http_rescuer::api::{handlers::AppStateInner, routes::create_router};

fn create_test_app() -> axum::Router {
    let state = Arc::new(AppStateInner::new("test-instance"));
    create_router(state)
}

// Helper to send request and parse JSON response
async fn send_json_request(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = create_test_app().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send_json_request("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "http-rescuer");
    assert_eq!(body["instance_id"], "test-instance");
}

#[tokio::test]
async fn test_existing_item() {
    let (status, body) = send_json_request("/items/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "anvil"}));
}

#[tokio::test]
async fn test_missing_item_is_not_found() {
    let (status, body) = send_json_request("/items/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": "ERROR_HTTP_NOT_FOUND", "message": "Not Found"}));
}

#[tokio::test]
async fn test_non_numeric_item_is_bad_request() {
    let (status, body) = send_json_request("/items/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"code": "ERROR_HTTP_BAD_REQUEST", "message": "Bad Request"})
    );
}

#[tokio::test]
async fn test_system_failure_defaults_to_internal() {
    let (status, body) = send_json_request("/fail/system").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "ERROR_INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "system failure requested (internal)");
}

#[tokio::test]
async fn test_system_failure_with_other_codes() {
    let (status, body) = send_json_request("/fail/system?code=timeout").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "system failure requested (timeout)");

    let (status, body) = send_json_request("/fail/system?code=http_not_found").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERROR_HTTP_NOT_FOUND");

    let (status, body) = send_json_request("/fail/system?code=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERROR_HTTP_BAD_REQUEST");
}

#[tokio::test]
async fn test_stack_failure_uses_requested_status_and_empty_code() {
    let (status, body) = send_json_request("/fail/stack/409").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({"code": "", "message": "stack failure with status 409"})
    );
}

#[tokio::test]
async fn test_stack_failure_rejects_success_status() {
    let (status, body) = send_json_request("/fail/stack/200").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERROR_HTTP_BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_failure_defaults() {
    let (status, body) = send_json_request("/fail/unknown").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"code": "ERROR_UNKNOWN_ERROR", "message": "unknown failure requested"})
    );
}

#[tokio::test]
async fn test_unknown_failure_with_status_and_code() {
    let (status, body) =
        send_json_request("/fail/unknown?status=418&code=TEAPOT&message=short+and+stout").await;

    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body, json!({"code": "TEAPOT", "message": "short and stout"}));
}

#[tokio::test]
async fn test_unknown_failure_with_code_only() {
    let (status, body) = send_json_request("/fail/unknown?code=LEGACY").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "LEGACY");
}

#[tokio::test]
async fn test_quota_failure_reports_its_own_status_and_code() {
    let (status, body) = send_json_request("/fail/quota").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body,
        json!({"code": "QUOTA_EXCEEDED", "message": "quota of 100 requests exhausted"})
    );
}

#[tokio::test]
async fn test_unmatched_route_is_rescued() {
    let (status, body) = send_json_request("/does/not/exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERROR_HTTP_NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = create_test_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
}

#[tokio::test]
async fn test_openapi_document_lists_error_schema() {
    let (status, body) = send_json_request("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["components"]["schemas"]["ErrorResponse"].is_object());
    assert!(body["paths"]["/fail/quota"].is_object());
}

#[tokio::test]
async fn test_metrics_endpoint_counts_rescued_errors() {
    let _ = send_json_request("/fail/quota").await;

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("errors_rescued_total"));
}

#[tokio::test]
async fn test_metrics_count_unmatched_routes() {
    let (status, _) = send_json_request("/nope/xyz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json_request("/items/777").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains(r#"path="unmatched""#));
    // Matched routes are still labelled by their template
    assert!(text.contains(r#"path="/items/:id""#));
    assert!(!text.contains(r#"path="/items/777""#));
}
