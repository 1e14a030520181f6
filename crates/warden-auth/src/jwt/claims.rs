//! JWT claims carried by every access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_core::UserId;
use warden_entity::user::RoleSet;

use crate::principal::Principal;

/// Claims payload.
///
/// Field names on the wire are fixed: `userId` and `authorities` are read
/// by other services sharing the signing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username.
    pub sub: String,
    /// Stable user identifier.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Space-delimited role names.
    pub authorities: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique per issued token.
    pub jti: Uuid,
}

impl Claims {
    /// Build the per-request principal. Unknown role names are dropped.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            username: self.sub.clone(),
            roles: RoleSet::from_claim(&self.authorities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_entity::user::Role;

    #[test]
    fn test_wire_names() {
        let claims = Claims {
            sub: "harry".into(),
            user_id: UserId::new(2),
            authorities: "admin user".into(),
            iat: 1,
            exp: 2,
            jti: Uuid::nil(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 2);
        assert_eq!(json["authorities"], "admin user");
        assert_eq!(json["sub"], "harry");
    }

    #[test]
    fn test_principal_ignores_unknown_roles() {
        let claims = Claims {
            sub: "harry".into(),
            user_id: UserId::new(2),
            authorities: "ROLE_admin user".into(),
            iat: 1,
            exp: 2,
            jti: Uuid::nil(),
        };
        let principal = claims.principal();
        assert_eq!(principal.user_id, UserId::new(2));
        assert!(principal.roles.contains(Role::User));
        assert!(!principal.roles.contains(Role::Admin));
    }
}
