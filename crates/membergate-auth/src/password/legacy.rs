//! Legacy MD5 credential verification.
//!
//! Pre-migration accounts carry an unsalted MD5 digest tagged
//! `legacy_md5`. Verification never mutates anything.
//
// TODO: port verified legacy accounts to argon2id on their next
// successful login once a migration policy is settled.

use std::sync::Arc;

use md5::{Digest, Md5};
use tracing::debug;

use membergate_core::error::AppError;
use membergate_core::result::AppResult;
use membergate_core::traits::CredentialStore;
use membergate_entity::member::Member;

/// Lowercase hex MD5 digest of a plaintext password.
pub fn legacy_digest(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

/// Validates credentials hashed with the legacy fast-hash algorithm.
#[derive(Clone)]
pub struct LegacyPasswordVerifier {
    store: Arc<dyn CredentialStore>,
}

impl LegacyPasswordVerifier {
    /// Creates a new verifier backed by the given credential store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Attempts a legacy login.
    ///
    /// The identifier matches either the username or the email field
    /// (case-sensitive, either qualifies). A wrong password and an
    /// unknown identifier produce the identical error, so the result
    /// never reveals whether the account exists.
    pub async fn verify(&self, identifier: &str, password: &str) -> AppResult<Member> {
        let digest = legacy_digest(password);

        match self.store.find_legacy_member(identifier, &digest).await? {
            Some(member) => {
                debug!(member_id = member.id, "Legacy credential verified");
                Ok(member)
            }
            None => Err(AppError::not_found("Invalid username or password.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_legacy_hash() {
        // The canonical pre-migration test account password.
        assert_eq!(legacy_digest("123456"), "e10adc3949ba59abbe56e057f20f883e");
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = legacy_digest("1234561");
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
