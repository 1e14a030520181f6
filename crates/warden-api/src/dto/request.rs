//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use warden_core::error::AppError;

/// Run `validator` rules and map failures to a validation error.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Provided arguments are invalid: {e}")))
}

fn default_enabled() -> bool {
    true
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// Initial password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Whether the account may log in.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Space-delimited role names.
    #[validate(length(min = 1, message = "roles are required"))]
    pub roles: String,
}

/// Update user request.
///
/// `enabled` and `roles` take effect only for admin callers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    /// New enabled flag.
    pub enabled: Option<bool>,
    /// New space-delimited role names.
    pub roles: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "old password is required"))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 1, message = "new password is required"))]
    pub new_password: String,
    /// Repeat of the new password.
    #[validate(length(min = 1, message = "confirm new password is required"))]
    pub confirm_new_password: String,
}
