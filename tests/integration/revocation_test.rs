//! Integration tests for whitelist revocation on role and credential changes.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_role_change_revokes_token() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;
    let harry = app.login("harry", PASSWORD).await;

    let update = app
        .request(
            "PUT",
            "/users/2",
            Some(json!({ "username": "harry", "enabled": true, "roles": "admin user" })),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["roles"], "admin user");

    let stale = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.code(), "TOKEN_REVOKED");

    // The fresh token carries the new authorities.
    let fresh = app.login("harry", PASSWORD).await;
    let listing = app.request("GET", "/users", None, Some(&fresh)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unchanged_roles_keep_token() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;
    let harry = app.login("harry", PASSWORD).await;

    let update = app
        .request(
            "PUT",
            "/users/2",
            Some(json!({ "username": "harry", "roles": "user" })),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);

    let response = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_username_update_keeps_token() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let update = app
        .request(
            "PUT",
            "/users/2",
            Some(json!({ "username": "harry.potter" })),
            Some(&harry),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["username"], "harry.potter");

    let response = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_password_change_revokes_token() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let change = app
        .request(
            "PATCH",
            "/users/2/password",
            Some(json!({
                "oldPassword": PASSWORD,
                "newPassword": "Firebolt42",
                "confirmNewPassword": "Firebolt42"
            })),
            Some(&harry),
        )
        .await;
    assert_eq!(change.status, StatusCode::OK);
    assert_eq!(change.code(), "SUCCESS");

    let stale = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.code(), "TOKEN_REVOKED");

    assert_eq!(
        app.basic_login("harry", PASSWORD).await.status,
        StatusCode::UNAUTHORIZED
    );
    app.login("harry", "Firebolt42").await;
}

#[tokio::test]
async fn test_rejected_password_change_keeps_token() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let mismatch = app
        .request(
            "PATCH",
            "/users/2/password",
            Some(json!({
                "oldPassword": PASSWORD,
                "newPassword": "Firebolt42",
                "confirmNewPassword": "Firebolt43"
            })),
            Some(&harry),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        mismatch.body["message"],
        "New password and confirm new password do not match."
    );

    let weak = app
        .request(
            "PATCH",
            "/users/2/password",
            Some(json!({
                "oldPassword": PASSWORD,
                "newPassword": "firebolt",
                "confirmNewPassword": "firebolt"
            })),
            Some(&harry),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let wrong_old = app
        .request(
            "PATCH",
            "/users/2/password",
            Some(json!({
                "oldPassword": "Nimbus2000",
                "newPassword": "Firebolt42",
                "confirmNewPassword": "Firebolt42"
            })),
            Some(&harry),
        )
        .await;
    assert_eq!(wrong_old.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_old.code(), "UNAUTHORIZED");

    let response = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_revokes_token() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;
    let ron = app.login("ron", PASSWORD).await;

    let delete = app.request("DELETE", "/users/3", None, Some(&admin)).await;
    assert_eq!(delete.status, StatusCode::OK);

    let stale = app.request("GET", "/users/3", None, Some(&ron)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stale.code(), "TOKEN_REVOKED");

    let missing = app.request("DELETE", "/users/3", None, Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Could not find user with Id 3");
}

#[tokio::test]
async fn test_blank_roles_update_rejected_and_token_kept() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;
    let ron = app.login("ron", PASSWORD).await;

    let update = app
        .request(
            "PUT",
            "/users/3",
            Some(json!({ "username": "ron", "roles": "   " })),
            Some(&admin),
        )
        .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
    assert_eq!(update.code(), "VALIDATION_ERROR");
    assert_eq!(update.body["message"], "roles are required");

    let still_valid = app.request("GET", "/users/3", None, Some(&ron)).await;
    assert_eq!(still_valid.status, StatusCode::OK);
    assert_eq!(still_valid.body["data"]["roles"], "user");
}
