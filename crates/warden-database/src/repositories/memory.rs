//! In-process user repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::UserId;
use warden_entity::user::{CreateUser, User};

use super::user::UserRepository;

/// User repository backed by a concurrent map.
///
/// Writes are serialised so the unique-username check and the insert
/// happen as one step. Reads go straight to the map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<DashMap<UserId, User>>,
    next_id: Arc<AtomicI64>,
    write_lock: Arc<Mutex<()>>,
}

impl MemoryUserRepository {
    /// Create an empty repository. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|entry| entry.username == username && Some(entry.id) != except)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.value().clone()))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        if self.username_taken(&data.username, None) {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                data.username
            )));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let user = User {
            id,
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            enabled: data.enabled,
            roles: data.roles.to_string(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        if !self.users.contains_key(&user.id) {
            return Err(AppError::not_found(format!(
                "Could not find user with Id {}",
                user.id
            )));
        }
        if self.username_taken(&user.username, Some(user.id)) {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        Ok(self.users.remove(&id).is_some())
    }
}
