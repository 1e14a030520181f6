//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use warden_api::{AppState, build_router};
use warden_auth::PasswordHasher;
use warden_cache::memory::MemoryCacheProvider;
use warden_cache::provider::CacheManager;
use warden_core::config::AppConfig;
use warden_core::config::cache::MemoryCacheConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::CacheProvider;
use warden_core::UserId;
use warden_database::{MemoryUserRepository, UserRepository};
use warden_entity::user::{CreateUser, RoleSet};

/// Password shared by every seeded account.
pub const PASSWORD: &str = "Password1";

pub const BASE: &str = "/api/v1";

/// Session store that can be switched into a failing state mid-test.
#[derive(Debug)]
pub struct SwitchableStore {
    inner: MemoryCacheProvider,
    failing: AtomicBool,
}

impl SwitchableStore {
    fn new() -> Self {
        Self {
            inner: MemoryCacheProvider::new(&MemoryCacheConfig::default()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent store call fail.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::cache("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheProvider for SwitchableStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.check()?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.check()?;
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.check()?;
        self.inner.health_check().await
    }
}

/// Test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The envelope `code` field.
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the whitelist directly
    pub state: AppState,
    /// Session store backing the whitelist
    pub store: Arc<SwitchableStore>,
    users: Arc<MemoryUserRepository>,
}

impl TestApp {
    /// Create a new test application with seeded accounts:
    /// `albus` (id 1, admin user), `harry` (id 2, user), `ron` (id 3, user).
    pub async fn new() -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        let store = Arc::new(SwitchableStore::new());
        let cache = CacheManager::from_provider(store.clone());

        let state = AppState::new(
            AppConfig::default(),
            users.clone() as Arc<dyn UserRepository>,
            cache,
        );
        let app = Self {
            router: build_router(state.clone()),
            state,
            store,
            users,
        };

        app.create_user("albus", "admin user", true).await;
        app.create_user("harry", "user", true).await;
        app.create_user("ron", "user", true).await;
        app
    }

    /// Insert a user directly into the repository.
    pub async fn create_user(&self, username: &str, roles: &str, enabled: bool) -> UserId {
        self.users
            .create(&CreateUser {
                username: username.to_string(),
                password_hash: PasswordHasher::new().hash(PASSWORD).unwrap(),
                enabled,
                roles: RoleSet::from_claim(roles),
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.basic_login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// POST the login endpoint with Basic credentials.
    pub async fn basic_login(&self, username: &str, password: &str) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(format!("{BASE}/users/login"));
        if let Some(headers) = req.headers_mut() {
            headers.typed_insert(Authorization::basic(username, password));
        }
        self.send(req.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Make an HTTP request to the test app under the API base path.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(format!("{BASE}{path}"))
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
