//! Role enumeration and role sets.
//!
//! Roles are persisted and carried in tokens as a space-delimited string
//! (`"admin user"`). Every component that checks a role goes through
//! [`Role`] so spellings cannot drift apart.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use warden_core::AppError;

/// Roles recognised by the authorization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrator; may act on any user's resources.
    Admin,
    /// Regular user; may act on resources it owns.
    User,
}

impl Role {
    /// Return the role as its canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, user"
            ))),
        }
    }
}

/// An ordered, duplicate-free set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Parse a space-delimited role string, rejecting unknown names.
    ///
    /// Used when storing a user record: what is persisted must be
    /// understood by the authorization layer.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        value
            .split_whitespace()
            .map(Role::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Parse a space-delimited role string, skipping unknown names.
    ///
    /// Used on token claims: an unrecognised capability grants nothing.
    pub fn from_claim(value: &str) -> Self {
        Self(
            value
                .split_whitespace()
                .filter_map(|name| name.parse().ok())
                .collect(),
        )
    }

    /// Check whether the set contains a role.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns `true` if no roles are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}
