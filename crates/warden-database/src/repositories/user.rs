//! User repository trait and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::UserId;
use warden_entity::user::{CreateUser, User};

/// Persistence operations the user service depends on.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// List every user ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user. A taken username is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Persist every field of an existing user. A missing row is `NotFound`.
    async fn save(&self, user: &User) -> AppResult<User>;

    /// Delete a user. Returns `false` when no row existed.
    async fn delete_by_id(&self, id: UserId) -> AppResult<bool>;
}

/// PostgreSQL user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, username, password_hash, enabled, roles";

fn write_error(e: sqlx::Error, username: &str, context: &'static str) -> AppError {
    let duplicate = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if duplicate {
        AppError::conflict(format!("Username '{username}' is already taken"))
    } else {
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, enabled, roles) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.enabled)
        .bind(data.roles.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &data.username, "Failed to create user"))
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = $2, password_hash = $3, enabled = $4, roles = $5 \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.enabled)
        .bind(&user.roles)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("Could not find user with Id {}", user.id)))
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
