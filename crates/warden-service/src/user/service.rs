//! User management: listing, creation, updates, deletion, password changes.

use std::sync::Arc;

use tracing::{debug, info};

use warden_auth::{PasswordHasher, PasswordPolicy};
use warden_core::UserId;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::UserRepository;
use warden_entity::user::{CreateUser, Role, RoleSet, User};

use super::revocation::{RevocationReason, RevocationTrigger};
use crate::context::RequestContext;

/// Data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Plaintext initial password.
    pub password: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Space-delimited role names.
    pub roles: String,
}

/// Data for updating a user.
///
/// `enabled` and `roles` are applied only when the caller is an admin;
/// `None` keeps the stored value.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    /// New username.
    pub username: String,
    /// New enabled flag.
    pub enabled: Option<bool>,
    /// New space-delimited role names.
    pub roles: Option<String>,
}

/// Handles user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<PasswordPolicy>,
    revocation: Arc<RevocationTrigger>,
}

fn not_found(id: UserId) -> AppError {
    AppError::not_found(format!("Could not find user with Id {id}"))
}

fn parse_roles(roles: &str) -> AppResult<RoleSet> {
    let roles = RoleSet::parse(roles)?;
    if roles.is_empty() {
        return Err(AppError::validation("roles are required"));
    }
    Ok(roles)
}

fn require_username(username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::validation("username is required"));
    }
    Ok(())
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        revocation: Arc<RevocationTrigger>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            revocation,
        }
    }

    /// Lists all users.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Gets a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Creates a user with a hashed password.
    pub async fn save(&self, ctx: &RequestContext, new_user: NewUser) -> AppResult<User> {
        require_username(&new_user.username)?;
        if new_user.password.is_empty() {
            return Err(AppError::validation("password is required"));
        }
        let roles = parse_roles(&new_user.roles)?;

        let user = self
            .users
            .create(&CreateUser {
                username: new_user.username,
                password_hash: self.hasher.hash(&new_user.password)?,
                enabled: new_user.enabled,
                roles,
            })
            .await?;

        info!(admin_id = %ctx.user_id, user_id = %user.id, roles = %user.roles, "User created");
        Ok(user)
    }

    /// Creates an admin account named `username` unless one already exists.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<bool> {
        require_username(username)?;
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        if !self.policy.is_satisfied_by(password) {
            return Err(AppError::configuration(
                "Startup admin password does not conform to password policy",
            ));
        }

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                password_hash: self.hasher.hash(password)?,
                enabled: true,
                roles: [Role::Admin, Role::User].into_iter().collect(),
            })
            .await?;

        info!(user_id = %user.id, username, "Startup admin account created");
        Ok(true)
    }

    /// Updates a user.
    ///
    /// A non-admin caller can change only the username. An admin can also
    /// change the enabled flag and the roles. The user's session is revoked
    /// after a successful save if, and only if, the role set changed.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        update: UserUpdate,
    ) -> AppResult<User> {
        require_username(&update.username)?;
        let existing = self.find_by_id(id).await?;
        let old_roles = existing.role_set();

        let mut user = existing;
        user.username = update.username;
        if ctx.is_admin() {
            if let Some(enabled) = update.enabled {
                user.enabled = enabled;
            }
            if let Some(roles) = update.roles {
                user.roles = parse_roles(&roles)?.to_string();
            }
        } else if update.enabled.is_some() || update.roles.is_some() {
            debug!(caller_id = %ctx.user_id, user_id = %id, "Ignoring privileged fields from non-admin");
        }

        let roles_changed = user.role_set() != old_roles;
        let saved = self.users.save(&user).await?;

        if roles_changed {
            self.revocation
                .revoke(saved.id, RevocationReason::RoleChange)
                .await?;
        }

        info!(caller_id = %ctx.user_id, user_id = %saved.id, roles_changed, "User updated");
        Ok(saved)
    }

    /// Deletes a user and revokes their session.
    pub async fn delete(&self, ctx: &RequestContext, id: UserId) -> AppResult<()> {
        self.find_by_id(id).await?;
        if !self.users.delete_by_id(id).await? {
            return Err(not_found(id));
        }
        self.revocation
            .revoke(id, RevocationReason::UserDeleted)
            .await?;

        info!(admin_id = %ctx.user_id, user_id = %id, "User deleted");
        Ok(())
    }

    /// Changes a user's password and revokes their session.
    pub async fn change_password(
        &self,
        id: UserId,
        old_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> AppResult<()> {
        let mut user = self.find_by_id(id).await?;

        if !self.hasher.verify(old_password, &user.password_hash)? {
            return Err(AppError::authentication("Old password is incorrect."));
        }
        self.policy
            .validate_change(new_password, confirm_new_password)?;

        user.password_hash = self.hasher.hash(new_password)?;
        self.users.save(&user).await?;
        self.revocation
            .revoke(id, RevocationReason::PasswordChange)
            .await?;

        info!(user_id = %id, "Password changed");
        Ok(())
    }
}
