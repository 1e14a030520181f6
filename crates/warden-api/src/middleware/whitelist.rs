//! The whitelist interceptor.
//!
//! Runs once per request after bearer verification and before any route
//! logic. A token that verifies cryptographically is still refused unless
//! it is exactly the token currently whitelisted for its user. The store is
//! only read here, never written.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use warden_auth::{BearerToken, Principal};
use warden_core::error::AppError;

use super::authenticate::bearer_token;
use crate::state::AppState;

/// Reject bearer requests whose token is no longer whitelisted.
///
/// Store failures propagate as `ErrorKind::Cache`, so the request fails
/// closed with 503 rather than being let through.
pub async fn enforce_whitelist(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if bearer_token(request.headers()).is_none() {
        return Ok(next.run(request).await);
    }

    let extensions = request.extensions();
    let (Some(principal), Some(token)) = (
        extensions.get::<Principal>(),
        extensions.get::<BearerToken>(),
    ) else {
        return Err(AppError::internal(
            "Bearer request reached the whitelist check without a verified principal",
        ));
    };

    if !state
        .whitelist
        .contains(principal.user_id, token.as_str())
        .await?
    {
        warn!(
            user_id = %principal.user_id,
            path = %request.uri().path(),
            "Rejected token that is not whitelisted"
        );
        return Err(AppError::token_revoked("Invalid token"));
    }

    Ok(next.run(request).await)
}
