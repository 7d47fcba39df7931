//! The atomic password-change transaction.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use membergate_core::error::AppError;
use membergate_core::result::AppResult;
use membergate_core::traits::{CredentialStore, MemberDirectory, TokenIssuer};
use membergate_entity::security::{HashAlgorithm, PasswordChangeSet};

use crate::password::legacy::legacy_digest;

/// Which flow requested the password change. Recorded as a boolean
/// claim on the session credential for audit purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordAction {
    /// An authenticated member changing their own password.
    ChangePassword,
    /// A reset-token holder setting a new password.
    ResetPassword,
}

impl PasswordAction {
    /// The claim name carried on the issued credential.
    pub fn as_claim(&self) -> &'static str {
        match self {
            Self::ChangePassword => "changePassword",
            Self::ResetPassword => "resetPassword",
        }
    }
}

/// Atomically installs a new password hash and invalidates the
/// outstanding reset token as one unit.
#[derive(Clone)]
pub struct PasswordChangeTransaction {
    store: Arc<dyn CredentialStore>,
    members: Arc<dyn MemberDirectory>,
    issuer: Arc<dyn TokenIssuer>,
}

impl PasswordChangeTransaction {
    /// Creates a new password-change transaction component.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        members: Arc<dyn MemberDirectory>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            members,
            issuer,
        }
    }

    /// Commits the new password and clears the reset token, then mints
    /// a session credential tagged with the action marker.
    ///
    /// The write goes through [`PasswordChangeSet`] — exactly the four
    /// permitted fields, nothing caller-supplied beyond the password
    /// itself. When `expected_token` is `Some`, the store applies the
    /// change only while that token is still outstanding, so a token
    /// consumed by a concurrent commit cannot be replayed.
    ///
    /// The hash stays pinned to the legacy algorithm for now.
    // TODO: switch the committed hash to argon2id once legacy clients
    // can no longer log in with the MD5 path.
    pub async fn commit(
        &self,
        member_id: i64,
        new_password: &str,
        action: PasswordAction,
        expected_token: Option<&str>,
    ) -> AppResult<String> {
        let change = PasswordChangeSet::new(legacy_digest(new_password), HashAlgorithm::LegacyMd5);

        let applied = self
            .store
            .commit_password_change(member_id, &change, expected_token)
            .await?;
        if !applied {
            return Err(match expected_token {
                Some(_) => AppError::token_corrupted(
                    "Your security token has become corrupted and is no longer valid. \
                     Please request a new password reset.",
                ),
                None => AppError::not_found("No security record found for member."),
            });
        }

        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::account_not_found(
                "We were unable to find a matching account for this security token.",
            ))?;

        info!(member_id, action = action.as_claim(), "Password changed");

        let mut claims = BTreeMap::new();
        claims.insert(action.as_claim().to_string(), true);
        self.issuer.issue(&member, &claims)
    }
}
