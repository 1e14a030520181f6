//! JWT token creation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

use super::claims::Claims;
use crate::principal::UserPrincipal;

/// A freshly signed token with its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Lifetime from issue; also the whitelist entry TTL.
    pub ttl: Duration,
}

/// Signs access tokens with HS256.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::from_secs(config.token_ttl_hours * 3600),
        }
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &UserPrincipal) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let lifetime = chrono::Duration::from_std(self.ttl)
            .map_err(|e| AppError::configuration(format!("Token lifetime out of range: {e}")))?;
        let expires_at = now + lifetime;

        let claims = Claims {
            sub: user.username().to_string(),
            user_id: user.id(),
            authorities: user.roles().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at,
            ttl: self.ttl,
        })
    }
}
