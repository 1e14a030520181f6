//! Workspace integration tests driving the full router in-process.

mod helpers;

mod auth_test;
mod authorization_test;
mod revocation_test;
mod store_failure_test;
