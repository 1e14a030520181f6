//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::{
    JwtDecoder, JwtEncoder, OwnerAuthorizer, PasswordHasher, PasswordPolicy, TokenIssuer,
    WhitelistStore,
};
use warden_cache::provider::CacheManager;
use warden_core::config::AppConfig;
use warden_database::UserRepository;
use warden_service::{RevocationTrigger, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Session store (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Token whitelist
    pub whitelist: Arc<WhitelistStore>,
    /// Login flow
    pub token_issuer: Arc<TokenIssuer>,
    /// Owner-or-admin decision engine
    pub authorizer: Arc<OwnerAuthorizer>,

    // ── Services ─────────────────────────────────────────────
    /// User management
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every component from configuration, a user repository, and a
    /// session store.
    pub fn new(config: AppConfig, users: Arc<dyn UserRepository>, cache: CacheManager) -> Self {
        let cache = Arc::new(cache);
        let hasher = Arc::new(PasswordHasher::new());
        let whitelist = Arc::new(WhitelistStore::new(Arc::clone(&cache)));

        let token_issuer = Arc::new(TokenIssuer::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::clone(&whitelist),
        ));

        let user_service = Arc::new(UserService::new(
            users,
            hasher,
            Arc::new(PasswordPolicy::new(&config.auth)),
            Arc::new(RevocationTrigger::new(Arc::clone(&whitelist))),
        ));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            authorizer: Arc::new(OwnerAuthorizer::default()),
            config: Arc::new(config),
            cache,
            whitelist,
            token_issuer,
            user_service,
        }
    }
}
