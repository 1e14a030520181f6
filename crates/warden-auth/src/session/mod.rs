//! Session whitelist and token issuing.

pub mod issuer;
pub mod whitelist;

pub use issuer::{LoginResult, TokenIssuer};
pub use whitelist::WhitelistStore;
