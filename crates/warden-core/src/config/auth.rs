//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in hours. Whitelist entries expire after the same window.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Clock-skew leeway applied when validating `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Username of the account created at startup when absent.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Password for that account. Empty disables the startup account.
    #[serde(default)]
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            leeway_seconds: default_leeway(),
            password_min_length: default_password_min(),
            admin_username: default_admin_username(),
            admin_password: String::new(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    2
}

fn default_leeway() -> u64 {
    5
}

fn default_password_min() -> usize {
    8
}

fn default_admin_username() -> String {
    "admin".to_string()
}
