//! Owner-or-admin authorization decisions.

use warden_entity::user::Role;

use super::template::PathTemplate;
use crate::principal::Principal;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// The caller may proceed.
    Allow,
    /// The caller lacks privilege for this resource.
    Deny,
}

impl AuthorizationDecision {
    /// Returns `true` for [`AuthorizationDecision::Allow`].
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }

    fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

/// Inputs of one decision.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationContext<'a> {
    /// Raw owner segment from the path; `None` when the path did not match.
    pub requested_user_id: Option<&'a str>,
    /// The caller.
    pub principal: &'a Principal,
}

impl AuthorizationContext<'_> {
    /// Evaluate `admin || (user && owner)`.
    ///
    /// Ownership is string equality between the path segment and the
    /// rendered caller id, so `"05"` is not owned by caller `5`.
    pub fn decide(&self) -> AuthorizationDecision {
        let has_admin = self.principal.roles.contains(Role::Admin);
        let has_user = self.principal.roles.contains(Role::User);
        let ids_match = self
            .requested_user_id
            .is_some_and(|segment| self.principal.user_id.matches_segment(segment));

        AuthorizationDecision::from_bool(has_admin || (has_user && ids_match))
    }
}

/// Decides access to resources owned by the user named in the path.
#[derive(Debug, Clone)]
pub struct OwnerAuthorizer {
    template: PathTemplate,
}

impl OwnerAuthorizer {
    /// Creates an authorizer over `template`.
    pub fn new(template: PathTemplate) -> Self {
        Self { template }
    }

    /// Decide whether `principal` may act on `path`.
    pub fn decide(&self, path: &str, principal: &Principal) -> AuthorizationDecision {
        AuthorizationContext {
            requested_user_id: self.template.capture(path),
            principal,
        }
        .decide()
    }

    /// Admin-only resources ignore ownership.
    pub fn require_admin(principal: &Principal) -> AuthorizationDecision {
        AuthorizationDecision::from_bool(principal.is_admin())
    }
}

impl Default for OwnerAuthorizer {
    fn default() -> Self {
        Self::new(PathTemplate::users())
    }
}
