//! Bearer-token verification.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use warden_auth::BearerToken;
use warden_core::error::AppError;

use crate::state::AppState;

/// Return the token of an `Authorization: Bearer <token>` header.
///
/// Any other header, or none, yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Verifies the signature and expiry of a bearer token and places the
/// resulting `Principal` and the raw `BearerToken` in the request
/// extensions.
///
/// Requests without a bearer token pass through untouched; routes that
/// need a caller reject them later. A bearer token that fails verification
/// is rejected here with an authentication error.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return Ok(next.run(request).await);
    };

    let claims = state.jwt_decoder.decode(&token).inspect_err(|e| {
        debug!(error = %e.message, "Bearer token rejected");
    })?;

    let extensions = request.extensions_mut();
    extensions.insert(claims.principal());
    extensions.insert(BearerToken(token));

    Ok(next.run(request).await)
}
