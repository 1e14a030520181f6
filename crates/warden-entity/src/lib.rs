//! # warden-entity
//!
//! Domain entity models for Warden. `User` is the persisted account row;
//! `Role` and `RoleSet` are the single source of truth for role names used
//! by both the token issuer and the authorization engine.

pub mod user;
