//! JWT session credential validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use membergate_core::config::auth::AuthConfig;
use membergate_core::error::AppError;
use membergate_core::result::AppResult;

use super::claims::Claims;

/// Validates session credentials issued by [`super::JwtEncoder`].
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the claim below so it surfaces as
        // its own error kind.
        validation.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session credential string.
    ///
    /// Checks:
    /// 1. Credential is present
    /// 2. Signature validity
    /// 3. Expiration
    pub fn authenticate(&self, credential: &str) -> AppResult<Claims> {
        if credential.is_empty() {
            return Err(AppError::session_invalid("Missing session credential."));
        }

        let token_data = decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::session_invalid("Malformed session credential.")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::session_invalid("Invalid session credential signature.")
                }
                _ => AppError::session_invalid(format!(
                    "Session credential validation failed: {e}"
                )),
            })?;

        let claims = token_data.claims;
        if claims.is_expired() {
            return Err(AppError::session_expired("Expired session credential."));
        }

        debug!(member_id = claims.member_id(), "Session credential authenticated");
        Ok(claims)
    }
}
