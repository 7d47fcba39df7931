//! JWT session credential creation with configurable signing and TTL.

use std::collections::BTreeMap;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use membergate_core::config::auth::AuthConfig;
use membergate_core::error::AppError;
use membergate_core::traits::TokenIssuer;
use membergate_entity::member::Member;

use super::claims::Claims;

/// Creates signed JWT session credentials for authenticated members.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Credential TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.jwt_ttl_minutes as i64,
        }
    }
}

impl TokenIssuer for JwtEncoder {
    fn issue(&self, member: &Member, custom_claims: &BTreeMap<String, bool>) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: member.id,
            email: member.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            actions: custom_claims.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session credential: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn test_member() -> Member {
        Member {
            id: 42,
            username: "TX150002".to_string(),
            email: "member@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issues_decodable_credential_with_action_claims() {
        let config = AuthConfig::default();
        let encoder = JwtEncoder::new(&config);

        let mut actions = BTreeMap::new();
        actions.insert("resetPassword".to_string(), true);

        let token = encoder.issue(&test_member(), &actions).unwrap();

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;
        let decoded = decode::<Claims>(&token, &decoding_key, &validation).unwrap();

        assert_eq!(decoded.claims.sub, 42);
        assert_eq!(decoded.claims.email, "member@example.com");
        assert!(decoded.claims.has_action("resetPassword"));
        assert!(!decoded.claims.has_action("changePassword"));
        assert!(!decoded.claims.is_expired());
    }
}
