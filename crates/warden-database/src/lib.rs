//! # warden-database
//!
//! User persistence for Warden: the [`UserRepository`] seam, a PostgreSQL
//! implementation on sqlx, and an in-memory implementation used when no
//! database URL is configured and throughout the tests.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{MemoryUserRepository, PgUserRepository, UserRepository};
