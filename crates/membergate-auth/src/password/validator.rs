//! Password policy enforcement for new passwords.
//!
//! The member password policy is intentionally thin: a minimum length
//! and the confirmation equality check. Pre-migration accounts use
//! six-digit passwords, so no character-class rules apply.

use membergate_core::config::auth::AuthConfig;
use membergate_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a new password and its confirmation.
    pub fn validate(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long.",
                self.min_length
            )));
        }

        if password != confirmation {
            return Err(AppError::validation(
                "The password confirmation does not match.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membergate_core::error::ErrorKind;

    #[test]
    fn accepts_matching_confirmation() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("123456", "123456").is_ok());
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        let err = validator.validate("2222222", "3333333").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "The password confirmation does not match.");
    }

    #[test]
    fn rejects_too_short_password() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        let err = validator.validate("12345", "12345").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
