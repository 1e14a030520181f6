//! User management and session revocation.

pub mod revocation;
pub mod service;

pub use revocation::{RevocationReason, RevocationTrigger};
pub use service::{NewUser, UserService, UserUpdate};
