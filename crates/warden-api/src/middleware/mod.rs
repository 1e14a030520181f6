//! Axum middleware stack.
//!
//! Order on a protected route, outermost first: `request_logging`,
//! `authenticate`, `enforce_whitelist`, then `require_owner` or
//! `require_admin`.

pub mod authenticate;
pub mod authorize;
pub mod cors;
pub mod logging;
pub mod whitelist;
