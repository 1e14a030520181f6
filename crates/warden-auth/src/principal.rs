//! Caller identity types.
//!
//! [`Principal`] is derived from verified token claims once per request and
//! travels through request extensions; nothing about it is global.
//! [`UserPrincipal`] is the narrow view of a stored user that the auth
//! layer is allowed to see.

use warden_core::UserId;
use warden_entity::user::{Role, RoleSet, User};

/// The authenticated caller of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Identifier from the `userId` claim.
    pub user_id: UserId,
    /// Username from the `sub` claim.
    pub username: String,
    /// Roles from the `authorities` claim.
    pub roles: RoleSet,
}

impl Principal {
    /// Returns `true` if the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(Role::Admin)
    }
}

/// The raw bearer token of the current request, exactly as presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Borrow the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only adapter over a persisted user.
#[derive(Debug, Clone)]
pub struct UserPrincipal {
    id: UserId,
    username: String,
    password_hash: String,
    enabled: bool,
    roles: RoleSet,
}

impl UserPrincipal {
    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored credential hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Whether the account may log in.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Role set.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

impl From<&User> for UserPrincipal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            enabled: user.enabled,
            roles: user.role_set(),
        }
    }
}
