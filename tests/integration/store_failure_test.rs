//! Integration tests for fail-closed behavior when the session store is down.

use http::StatusCode;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_bearer_request_fails_closed() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;
    app.store.fail();

    let response = app.request("GET", "/users/2", None, Some(&harry)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.code(), "STORE_UNAVAILABLE");
    assert_eq!(response.body["flag"], false);
    assert_eq!(response.body["message"], "Session store unavailable");
}

#[tokio::test]
async fn test_login_fails_when_store_down() {
    let app = TestApp::new().await;
    app.store.fail();

    let response = app.basic_login("harry", PASSWORD).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn test_health_reports_store_down() {
    let app = TestApp::new().await;
    app.store.fail();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["data"]["status"], "DOWN");
}

#[tokio::test]
async fn test_unauthenticated_request_does_not_touch_store() {
    let app = TestApp::new().await;
    app.store.fail();

    let response = app.request("GET", "/users/2", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
