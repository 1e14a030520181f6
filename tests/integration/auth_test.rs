//! Integration tests for login and bearer verification.

use http::StatusCode;

use warden_core::UserId;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;

    let response = app.basic_login("harry", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.code(), "SUCCESS");
    assert_eq!(response.body["flag"], true);
    assert_eq!(response.body["data"]["userInfo"]["username"], "harry");
    assert_eq!(response.body["data"]["userInfo"]["roles"], "user");
    assert!(response.body["data"]["userInfo"].get("password_hash").is_none());

    let token = response.body["data"]["token"].as_str().unwrap();
    let stored = app.state.whitelist.get(UserId::new(2)).await.unwrap();
    assert_eq!(stored.as_deref(), Some(token));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;

    let response = app.basic_login("harry", "wrongpassword").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
    assert_eq!(response.body["message"], "username or password is incorrect");
    assert_eq!(app.state.whitelist.get(UserId::new(2)).await.unwrap(), None);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let response = app.basic_login("nobody", PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "username or password is incorrect");
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = TestApp::new().await;
    app.create_user("peter", "user", false).await;

    let response = app.basic_login("peter", PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_without_credentials() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/users/login", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_new_login_supersedes_previous_token() {
    let app = TestApp::new().await;
    let first = app.login("harry", PASSWORD).await;
    let second = app.login("harry", PASSWORD).await;
    assert_ne!(first, second);

    let stale = app.request("GET", "/users/2", None, Some(&first)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.code(), "TOKEN_REVOKED");

    let current = app.request("GET", "/users/2", None, Some(&second)).await;
    assert_eq!(current.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_token_is_unauthorized_not_revoked() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/users/2", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_missing_token_on_protected_route() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/users/2", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_health_reports_store_up() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "UP");
}
