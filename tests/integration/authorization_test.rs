//! Integration tests for owner-or-admin and admin-only route guards.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_admin_may_access_any_user() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;

    let other = app.request("GET", "/users/2", None, Some(&admin)).await;
    assert_eq!(other.status, StatusCode::OK);
    assert_eq!(other.body["data"]["username"], "harry");

    // Allowed by the guard, then absent.
    let absent = app.request("GET", "/users/5", None, Some(&admin)).await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
    assert_eq!(absent.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_user_may_access_only_self() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let own = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(own.status, StatusCode::OK);

    let other = app.request("GET", "/users/3", None, Some(&harry)).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
    assert_eq!(other.code(), "FORBIDDEN");

    let update_other = app
        .request(
            "PUT",
            "/users/3",
            Some(json!({ "username": "ronald" })),
            Some(&harry),
        )
        .await;
    assert_eq!(update_other.status, StatusCode::FORBIDDEN);

    let password_other = app
        .request(
            "PATCH",
            "/users/3/password",
            Some(json!({
                "oldPassword": PASSWORD,
                "newPassword": "Firebolt42",
                "confirmNewPassword": "Firebolt42"
            })),
            Some(&harry),
        )
        .await;
    assert_eq!(password_other.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_id_segment_compared_as_text() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let padded = app.request("GET", "/users/02", None, Some(&harry)).await;
    assert_eq!(padded.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_roles_are_denied() {
    let app = TestApp::new().await;
    let id = app.create_user("argus", "", true).await;
    let argus = app.login("argus", PASSWORD).await;

    let own = app
        .request("GET", &format!("/users/{id}"), None, Some(&argus))
        .await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_only_routes() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let listing = app.request("GET", "/users", None, Some(&harry)).await;
    assert_eq!(listing.status, StatusCode::FORBIDDEN);

    let create = app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "draco", "password": PASSWORD, "roles": "user" })),
            Some(&harry),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let delete_self = app.request("DELETE", "/users/2", None, Some(&harry)).await;
    assert_eq!(delete_self.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_creates_user() {
    let app = TestApp::new().await;
    let admin = app.login("albus", PASSWORD).await;

    let created = app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "draco", "password": PASSWORD, "roles": "user" })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["data"]["id"], 4);
    assert_eq!(created.body["data"]["enabled"], true);
    assert!(created.body["data"].get("password").is_none());

    let duplicate = app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "draco", "password": PASSWORD, "roles": "user" })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let no_roles = app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "vincent", "password": PASSWORD, "roles": "" })),
            Some(&admin),
        )
        .await;
    assert_eq!(no_roles.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_roles.code(), "VALIDATION_ERROR");

    app.login("draco", PASSWORD).await;
}

#[tokio::test]
async fn test_non_admin_cannot_escalate() {
    let app = TestApp::new().await;
    let harry = app.login("harry", PASSWORD).await;

    let update = app
        .request(
            "PUT",
            "/users/2",
            Some(json!({ "username": "harry", "enabled": false, "roles": "admin user" })),
            Some(&harry),
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["roles"], "user");
    assert_eq!(update.body["data"]["enabled"], true);

    let still_valid = app.request("GET", "/users/2", None, Some(&harry)).await;
    assert_eq!(still_valid.status, StatusCode::OK);
}
