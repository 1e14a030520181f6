//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};

use warden_auth::Principal;
use warden_core::UserId;
use warden_entity::user::{Role, RoleSet};

/// Context for the current authenticated request.
///
/// Built by the API layer from the request's [`Principal`] and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The caller's user ID.
    pub user_id: UserId,
    /// The caller's username (from token claims).
    pub username: String,
    /// The caller's roles at the time the token was issued.
    pub roles: RoleSet,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `principal`.
    pub fn new(principal: &Principal) -> Self {
        Self {
            user_id: principal.user_id,
            username: principal.username.clone(),
            roles: principal.roles.clone(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(Role::Admin)
    }
}
