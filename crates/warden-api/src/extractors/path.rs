//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use warden_core::UserId;
use warden_core::error::AppError;

/// The `{userId}` path segment parsed as a [`UserId`].
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

/// Parses a user id from a path segment.
pub fn parse_user_id(s: &str) -> Result<UserId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid user id: {s}")))
}

impl<S: Send + Sync> FromRequestParts<S> for UserIdPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        parse_user_id(&raw).map(UserIdPath)
    }
}
