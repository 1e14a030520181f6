//! Key builders for every entry Warden writes to the session store.
//!
//! Keys are shared with other services reading the same store, so the
//! layout is fixed: no application prefix is baked in here. A deployment
//! that needs namespacing sets `cache.redis.key_prefix` instead.

use warden_core::UserId;

/// Key holding the currently valid token of a user.
pub fn whitelist(user_id: UserId) -> String {
    format!("whitelist:{user_id}")
}
