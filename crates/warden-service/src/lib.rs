//! # warden-service
//!
//! Business logic for Warden. Services follow constructor injection: all
//! dependencies are provided at construction time via `Arc` references.
//!
//! Every user-management operation that changes a user's roles or
//! credential ends by revoking that user's whitelisted token.

pub mod context;
pub mod user;

pub use context::RequestContext;
pub use user::{RevocationTrigger, UserService};
