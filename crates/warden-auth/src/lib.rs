//! # warden-auth
//!
//! Authentication and request authorization for Warden.
//!
//! ## Modules
//!
//! - `jwt`: signed token creation and verification
//! - `password`: Argon2id hashing and the password policy
//! - `session`: the token whitelist and the login flow that fills it
//! - `principal`: the per-request caller identity and the user adapter
//! - `authz`: path templates and the owner-or-admin decision engine

pub mod authz;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod session;

pub use authz::{AuthorizationDecision, OwnerAuthorizer, PathTemplate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordPolicy};
pub use principal::{BearerToken, Principal, UserPrincipal};
pub use session::{TokenIssuer, WhitelistStore};
