//! The token whitelist.
//!
//! One entry per user, `whitelist:{userId}` → the only token that user may
//! currently present. A login overwrites it, revocation deletes it, and the
//! store expires it together with the token.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use warden_cache::keys;
use warden_cache::provider::CacheManager;
use warden_core::UserId;
use warden_core::result::AppResult;
use warden_core::traits::CacheProvider;

/// Whitelist client over the configured session store.
///
/// Store failures propagate as `ErrorKind::Cache`; nothing here retries or
/// swallows them.
#[derive(Debug, Clone)]
pub struct WhitelistStore {
    cache: Arc<CacheManager>,
}

impl WhitelistStore {
    /// Creates a whitelist over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Make `token` the current token of `user_id`, replacing any previous one.
    pub async fn put(&self, user_id: UserId, token: &str, ttl: Duration) -> AppResult<()> {
        self.cache.set(&keys::whitelist(user_id), token, ttl).await?;
        debug!(user_id = %user_id, ttl_secs = ttl.as_secs(), "Whitelisted token");
        Ok(())
    }

    /// Current token of `user_id`, if any.
    ///
    /// Never issued, expired, and revoked all read as `None`.
    pub async fn get(&self, user_id: UserId) -> AppResult<Option<String>> {
        self.cache.get(&keys::whitelist(user_id)).await
    }

    /// Forget the current token of `user_id`. Succeeds when none exists.
    pub async fn delete(&self, user_id: UserId) -> AppResult<()> {
        self.cache.delete(&keys::whitelist(user_id)).await
    }

    /// Returns `true` only if `token` is exactly the current token of `user_id`.
    pub async fn contains(&self, user_id: UserId, token: &str) -> AppResult<bool> {
        Ok(self.get(user_id).await?.as_deref() == Some(token))
    }
}
