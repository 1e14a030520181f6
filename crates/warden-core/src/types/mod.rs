//! Core type definitions used across the Warden workspace.

pub mod id;

pub use id::UserId;
