//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Every request passes through the same chain: bearer-token verification,
//! the whitelist interceptor, then per-route authorization, before a
//! handler runs. Errors from any stage render as the JSON envelope in
//! [`dto::response`].

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
