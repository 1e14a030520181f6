//! Login flow: verify credentials, sign a token, whitelist it.

use std::sync::Arc;

use tracing::{info, warn};

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_database::UserRepository;
use warden_entity::user::User;

use super::whitelist::WhitelistStore;
use crate::jwt::{IssuedToken, JwtEncoder};
use crate::password::PasswordHasher;
use crate::principal::UserPrincipal;

const BAD_CREDENTIALS: &str = "username or password is incorrect";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The token now whitelisted for that user.
    pub token: IssuedToken,
}

/// Issues tokens and registers them as the user's current token.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    whitelist: Arc<WhitelistStore>,
}

impl TokenIssuer {
    /// Creates a new token issuer.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        whitelist: Arc<WhitelistStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            whitelist,
        }
    }

    /// Authenticate `username`/`password` and issue a token.
    ///
    /// Unknown user, wrong password, and disabled account all produce the
    /// same authentication error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication(BAD_CREDENTIALS))?;

        let principal = UserPrincipal::from(&user);
        if !self.hasher.verify(password, principal.password_hash())? {
            warn!(username, "Login rejected: wrong password");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }
        if !principal.enabled() {
            warn!(user_id = %principal.id(), "Login rejected: account disabled");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        let token = self.issue(&principal).await?;
        info!(user_id = %principal.id(), roles = %principal.roles(), "User logged in");
        Ok(LoginResult { user, token })
    }

    /// Sign a token for `user` and make it the user's only valid token.
    ///
    /// If the whitelist write fails the token is not returned, so it can
    /// never be used.
    pub async fn issue(&self, user: &UserPrincipal) -> AppResult<IssuedToken> {
        let issued = self.encoder.issue(user)?;
        self.whitelist.put(user.id(), &issued.token, issued.ttl).await?;
        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_cache::memory::MemoryCacheProvider;
    use warden_cache::provider::CacheManager;
    use warden_core::ErrorKind;
    use warden_core::config::AuthConfig;
    use warden_core::config::cache::MemoryCacheConfig;
    use warden_database::MemoryUserRepository;
    use warden_entity::user::{CreateUser, RoleSet};

    struct Fixture {
        issuer: TokenIssuer,
        whitelist: Arc<WhitelistStore>,
        users: Arc<MemoryUserRepository>,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserRepository::new());
        let hasher = Arc::new(PasswordHasher::new());
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig::default(),
        )));
        let whitelist = Arc::new(WhitelistStore::new(Arc::new(cache)));
        let encoder = Arc::new(JwtEncoder::new(&AuthConfig::default()));

        users
            .create(&CreateUser {
                username: "hermione".into(),
                password_hash: hasher.hash("Granger123").unwrap(),
                enabled: true,
                roles: RoleSet::parse("admin user").unwrap(),
            })
            .await
            .unwrap();

        Fixture {
            issuer: TokenIssuer::new(users.clone(), hasher, encoder, whitelist.clone()),
            whitelist,
            users,
        }
    }

    #[tokio::test]
    async fn test_login_whitelists_issued_token() {
        let fx = fixture().await;
        let result = fx.issuer.login("hermione", "Granger123").await.unwrap();
        assert_eq!(
            fx.whitelist.get(result.user.id).await.unwrap(),
            Some(result.token.token.clone())
        );
    }

    #[tokio::test]
    async fn test_second_login_replaces_first_token() {
        let fx = fixture().await;
        let first = fx.issuer.login("hermione", "Granger123").await.unwrap();
        let second = fx.issuer.login("hermione", "Granger123").await.unwrap();
        assert_ne!(first.token.token, second.token.token);
        let id = first.user.id;
        assert!(!fx.whitelist.contains(id, &first.token.token).await.unwrap());
        assert!(fx.whitelist.contains(id, &second.token.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let fx = fixture().await;
        let wrong = fx.issuer.login("hermione", "nope").await.unwrap_err();
        assert!(wrong.is(ErrorKind::Authentication));
        let unknown = fx.issuer.login("draco", "Granger123").await.unwrap_err();
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_disabled_user_cannot_login() {
        let fx = fixture().await;
        let mut user = fx.users.find_by_username("hermione").await.unwrap().unwrap();
        user.enabled = false;
        fx.users.save(&user).await.unwrap();

        let err = fx.issuer.login("hermione", "Granger123").await.unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
        assert_eq!(fx.whitelist.get(user.id).await.unwrap(), None);
    }
}
