//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session credential TTL in minutes.
    #[serde(default = "default_session_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Password-reset token TTL in hours.
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_session_ttl(),
            reset_token_ttl_hours: default_reset_token_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    60
}

fn default_reset_token_ttl() -> u64 {
    2
}

// Legacy member passwords are six digits; anything stricter would lock
// out every pre-migration account.
fn default_password_min() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_legacy_constants() {
        let config = AuthConfig::default();
        assert_eq!(config.reset_token_ttl_hours, 2);
        assert_eq!(config.password_min_length, 6);
    }
}
