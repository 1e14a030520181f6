//! Revocation of a user's current token.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use warden_auth::WhitelistStore;
use warden_core::UserId;
use warden_core::result::AppResult;

/// Why a session is being revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationReason {
    /// The user's role set changed.
    RoleChange,
    /// The user's password changed.
    PasswordChange,
    /// The user was deleted.
    UserDeleted,
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleChange => write!(f, "role_change"),
            Self::PasswordChange => write!(f, "password_change"),
            Self::UserDeleted => write!(f, "user_deleted"),
        }
    }
}

/// Deletes a user's whitelist entry so their outstanding token stops
/// working on the next request.
///
/// Callers invoke it only after the record change has been persisted.
#[derive(Debug, Clone)]
pub struct RevocationTrigger {
    whitelist: Arc<WhitelistStore>,
}

impl RevocationTrigger {
    /// Creates a trigger over the whitelist.
    pub fn new(whitelist: Arc<WhitelistStore>) -> Self {
        Self { whitelist }
    }

    /// Revoke the current token of `user_id`.
    pub async fn revoke(&self, user_id: UserId, reason: RevocationReason) -> AppResult<()> {
        self.whitelist.delete(user_id).await?;
        info!(user_id = %user_id, reason = %reason, "Session revoked");
        Ok(())
    }
}
