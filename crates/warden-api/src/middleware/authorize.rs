//! Route-level authorization guards.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use warden_auth::{OwnerAuthorizer, Principal};
use warden_core::error::AppError;

use crate::state::AppState;

fn principal(request: &Request) -> Result<&Principal, AppError> {
    request
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| AppError::authentication("Full authentication is required to access this resource"))
}

/// Path relative to the API mount point.
///
/// Inside a nested router the prefix is usually already stripped; strip it
/// here too so the decision sees `/users/{id}` either way.
fn resource_path<'a>(path: &'a str, base_url: &str) -> &'a str {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Allow admins, or users acting on the user id in the path.
pub async fn require_owner(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = principal(&request)?;
    let path = resource_path(request.uri().path(), &state.config.server.base_url);

    let decision = state.authorizer.decide(path, caller);
    if !decision.is_allowed() {
        warn!(user_id = %caller.user_id, roles = %caller.roles, path, "Access denied");
        return Err(AppError::authorization("No permission."));
    }
    debug!(user_id = %caller.user_id, path, "Access granted");

    Ok(next.run(request).await)
}

/// Allow admins only.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let caller = principal(&request)?;
    if !OwnerAuthorizer::require_admin(caller).is_allowed() {
        warn!(user_id = %caller.user_id, path = %request.uri().path(), "Admin access denied");
        return Err(AppError::authorization("No permission."));
    }

    Ok(next.run(request).await)
}
