//! `AuthUser` extractor: exposes the verified caller to handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use warden_auth::Principal;
use warden_core::error::AppError;
use warden_service::RequestContext;

use crate::state::AppState;

/// Authenticated caller context available in handlers.
///
/// The principal is placed in the request extensions by the `authenticate`
/// middleware; this extractor only reads it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().ok_or_else(|| {
            AppError::authentication("Full authentication is required to access this resource")
        })?;

        Ok(AuthUser(RequestContext::new(principal)))
    }
}
