//! Response DTOs.

use serde::{Deserialize, Serialize};

use warden_core::UserId;
use warden_entity::user::User;

/// Envelope wrapping every response body, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub flag: bool,
    /// Machine-readable outcome code (`SUCCESS`, `TOKEN_REVOKED`, ...).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Payload; `null` on failure.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            flag: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a successful response without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            flag: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Creates a failure response.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            flag: false,
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// Public view of a user. The password hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Space-delimited role names.
    pub roles: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            enabled: user.enabled,
            roles: user.roles,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The logged-in user.
    pub user_info: UserResponse,
    /// Bearer token, now the user's only valid token.
    pub token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `UP` or `DOWN`.
    pub status: String,
    /// Session store reachability.
    pub session_store: String,
    /// Version.
    pub version: String,
}
