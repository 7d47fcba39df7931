//! Session orchestration — login with the legacy fallback, reset-token
//! requests, and the two password-change entry points.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use membergate_core::config::auth::AuthConfig;
use membergate_core::error::AppError;
use membergate_core::result::AppResult;
use membergate_core::traits::{CredentialStore, MemberDirectory, TokenIssuer};
use membergate_entity::member::Member;
use membergate_entity::security::HashAlgorithm;

use crate::jwt::{Claims, JwtDecoder};
use crate::password::{LegacyPasswordVerifier, PasswordHasher, PasswordValidator};
use crate::reset::{PasswordAction, PasswordChangeTransaction, ResetTokenService};

/// Orchestrates the member authentication flows over the collaborator
/// traits. All dependencies are injected at construction; there is no
/// ambient state.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    members: Arc<dyn MemberDirectory>,
    issuer: Arc<dyn TokenIssuer>,
    decoder: JwtDecoder,
    legacy: LegacyPasswordVerifier,
    reset_tokens: ResetTokenService,
    change: PasswordChangeTransaction,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl SessionService {
    /// Wires up the service and its sub-components.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        members: Arc<dyn MemberDirectory>,
        issuer: Arc<dyn TokenIssuer>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
            legacy: LegacyPasswordVerifier::new(Arc::clone(&store)),
            reset_tokens: ResetTokenService::new(
                Arc::clone(&store),
                Arc::clone(&members),
                config,
            ),
            change: PasswordChangeTransaction::new(
                Arc::clone(&store),
                Arc::clone(&members),
                Arc::clone(&issuer),
            ),
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            store,
            members,
            issuer,
        }
    }

    /// The reset-token service, for callers that verify tokens without
    /// changing a password (e.g. a "is this link still valid" check).
    pub fn reset_tokens(&self) -> &ResetTokenService {
        &self.reset_tokens
    }

    /// Validates a previously issued session credential and returns
    /// its claims. Expired, malformed, and missing credentials each
    /// fail with their own error kind.
    pub fn authenticate(&self, credential: &str) -> AppResult<Claims> {
        self.decoder.authenticate(credential)
    }

    /// Authenticates a member and mints a session credential.
    ///
    /// The legacy MD5 path runs first; any failure there is deliberately
    /// suppressed and the primary path gets its attempt. Every failure
    /// collapses into the same non-leaking error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        // Attempt via MD5 first.
        match self.legacy.verify(username, password).await {
            Ok(member) => {
                info!(member_id = member.id, "Member logged in via legacy auth");
                return self.issuer.issue(&member, &BTreeMap::new());
            }
            Err(e) => {
                // Do nothing. It will then attempt a regular login.
                debug!(error = %e, "Legacy auth missed, falling through to primary");
            }
        }

        let member = self.locate(username).await?.ok_or_else(unauthorized)?;

        let record = self
            .store
            .find_by_member_id(member.id)
            .await?
            .ok_or_else(unauthorized)?;

        if record.algorithm != HashAlgorithm::Modern
            || !self.hasher.verify_password(password, &record.password_hash)?
        {
            return Err(unauthorized());
        }

        info!(member_id = member.id, "Member logged in");
        self.issuer.issue(&member, &BTreeMap::new())
    }

    /// Issues a reset token for the member owning the given email.
    ///
    /// Delivery of the token (the reset email) is the caller's concern.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<String> {
        let member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("No account found for that email."))?;

        self.reset_tokens.issue(member.id).await
    }

    /// Changes an authenticated member's password and returns a fresh
    /// session credential.
    pub async fn change_password(
        &self,
        member_id: i64,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<String> {
        self.validator.validate(new_password, confirmation)?;

        self.change
            .commit(member_id, new_password, PasswordAction::ChangePassword, None)
            .await
    }

    /// Resets a password using a reset token.
    ///
    /// 1. Verify the token against the caller-supplied email.
    /// 2. Re-confirm the claim's email literally equals the supplied
    ///    one (defense in depth).
    /// 3. Re-resolve the security record by the (member id, email)
    ///    conjunction, guarding against stale identifiers.
    /// 4. Commit with the verified token as the compare-and-clear
    ///    guard.
    pub async fn reset_password(
        &self,
        email: &str,
        reset_token: &str,
        new_password: &str,
        confirmation: &str,
    ) -> AppResult<String> {
        self.validator.validate(new_password, confirmation)?;

        let claim = self.reset_tokens.verify(reset_token, Some(email)).await?;

        if claim.email != email {
            return Err(AppError::email_mismatch(
                "The email used for resetting the password doesn't match the member's email.",
            ));
        }

        let record = self
            .store
            .find_by_member_and_email(claim.member_id, email)
            .await?
            .ok_or_else(|| {
                AppError::account_not_found(
                    "We were unable to find a matching account for this security token.",
                )
            })?;

        self.change
            .commit(
                record.member_id,
                new_password,
                PasswordAction::ResetPassword,
                Some(&claim.reset_token),
            )
            .await
    }

    /// Username-then-email member lookup.
    async fn locate(&self, identifier: &str) -> AppResult<Option<Member>> {
        if let Some(member) = self.members.find_by_username(identifier).await? {
            return Ok(Some(member));
        }
        self.members.find_by_email(identifier).await
    }
}

fn unauthorized() -> AppError {
    AppError::not_found("Invalid username or password.")
}
