//! Reset-token issuance and verification.
//!
//! Token state machine per security record:
//!
//! ```text
//! NO_TOKEN -> TOKEN_ISSUED -> (consumed -> NO_TOKEN)
//!                           | (expired  -> rejected on next check)
//! ```
//!
//! Expiry is checked lazily at verification time; there is no
//! background sweep. An expired row is harmless (it can never verify)
//! and is overwritten by the next issuance or cleared by the next
//! password change.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use membergate_core::config::auth::AuthConfig;
use membergate_core::error::AppError;
use membergate_core::result::AppResult;
use membergate_core::traits::{CredentialStore, MemberDirectory};
use membergate_entity::security::VerifiedResetClaim;

/// Generates, validates, and expires password-reset tokens.
#[derive(Clone)]
pub struct ResetTokenService {
    store: Arc<dyn CredentialStore>,
    members: Arc<dyn MemberDirectory>,
    /// Token time-to-live.
    ttl: Duration,
}

impl ResetTokenService {
    /// Creates a new reset-token service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        members: Arc<dyn MemberDirectory>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            members,
            ttl: Duration::hours(config.reset_token_ttl_hours as i64),
        }
    }

    /// Generates a new reset token for the member and stores it with
    /// the current timestamp, overwriting any prior token. Only the
    /// most recent token is ever valid.
    pub async fn issue(&self, member_id: i64) -> AppResult<String> {
        let token = Uuid::new_v4().simple().to_string();

        let updated = self
            .store
            .store_reset_token(member_id, &token, Utc::now())
            .await?;
        if !updated {
            return Err(AppError::not_found("No security record found for member."));
        }

        info!(member_id, "Reset token issued");
        Ok(token)
    }

    /// Validates a reset token and resolves the claim it proves.
    ///
    /// Failure modes, checked in order:
    /// - no record holds the token (never issued or already consumed —
    ///   indistinguishable by design): `TokenCorrupted`
    /// - the token is older than its TTL: `TokenExpired`
    /// - the record has no owning member: `OrphanedToken`
    /// - `expected_email` differs from the member's email:
    ///   `TokenEmailMismatch`
    ///
    /// Produces no mutation on any path.
    pub async fn verify(
        &self,
        token: &str,
        expected_email: Option<&str>,
    ) -> AppResult<VerifiedResetClaim> {
        let record = self
            .store
            .find_by_reset_token(token)
            .await?
            .ok_or_else(|| {
                AppError::token_corrupted(
                    "Your security token has become corrupted and is no longer valid. \
                     Please request a new password reset.",
                )
            })?;

        // A record holding a token without a timestamp violates the
        // both-or-neither invariant; treat it as unverifiable.
        let created_at = record.token_created_at.ok_or_else(|| {
            AppError::token_corrupted(
                "Your security token has become corrupted and is no longer valid. \
                 Please request a new password reset.",
            )
        })?;

        if Utc::now() > created_at + self.ttl {
            warn!(member_id = record.member_id, "Expired reset token presented");
            return Err(AppError::token_expired(
                "The security token you provided has expired. Please request a new one.",
            ));
        }

        let member = self
            .members
            .find_by_id(record.member_id)
            .await?
            .ok_or_else(|| {
                AppError::orphaned_token(
                    "The security token provided was issued for somebody else's account. \
                     Please log in again.",
                )
            })?;

        if let Some(email) = expected_email {
            if member.email != email {
                warn!(member_id = member.id, "Reset token presented for the wrong email");
                return Err(AppError::token_email_mismatch(format!(
                    "A reset token was used for the wrong email: {email}."
                )));
            }
        }

        Ok(VerifiedResetClaim {
            member_id: member.id,
            email: member.email,
            reset_token: token.to_string(),
        })
    }
}
