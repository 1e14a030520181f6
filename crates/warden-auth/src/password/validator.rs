//! Password policy for new passwords.

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

/// Requires a minimum length and at least one ASCII digit, lowercase
/// letter, and uppercase letter.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns `true` if `password` satisfies the policy.
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        password.chars().count() >= self.min_length
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
    }

    /// Validate a password change request.
    pub fn validate_change(&self, new_password: &str, confirm: &str) -> Result<(), AppError> {
        if new_password != confirm {
            return Err(AppError::validation(
                "New password and confirm new password do not match.",
            ));
        }
        if !self.is_satisfied_by(new_password) {
            return Err(AppError::validation(
                "New password does not conform to password policy.",
            ));
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}
