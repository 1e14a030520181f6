//! Request authorization.

pub mod decision;
pub mod template;

pub use decision::{AuthorizationContext, AuthorizationDecision, OwnerAuthorizer};
pub use template::PathTemplate;
