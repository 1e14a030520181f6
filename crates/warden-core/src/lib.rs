//! # warden-core
//!
//! Core crate for Warden. Contains the cache provider trait, configuration
//! schemas, the user identifier type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::UserId;
