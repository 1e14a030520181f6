//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use warden_core::UserId;

use super::role::{Role, RoleSet};

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Space-delimited role names.
    pub roles: String,
}

impl User {
    /// Parse the stored role string, skipping names the system does not know.
    pub fn role_set(&self) -> RoleSet {
        RoleSet::from_claim(&self.roles)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role_set().contains(Role::Admin)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial enabled flag.
    pub enabled: bool,
    /// Initial roles.
    pub roles: RoleSet,
}
