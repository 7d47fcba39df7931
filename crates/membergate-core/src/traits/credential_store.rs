//! Persistence contract for per-member security records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use membergate_entity::member::Member;
use membergate_entity::security::{PasswordChangeSet, SecurityRecord};

use crate::result::AppResult;

/// Durable store for [`SecurityRecord`]s.
///
/// All queries are point lookups with bounded latency. The store is the
/// only shared mutable resource in the system; `commit_password_change`
/// is the single transactional multi-field write.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the security record owned by the given member.
    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Option<SecurityRecord>>;

    /// Find the security record holding the given reset token.
    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<SecurityRecord>>;

    /// Find the security record matching both the member id and the
    /// owning member's email (conjunction).
    async fn find_by_member_and_email(
        &self,
        member_id: i64,
        email: &str,
    ) -> AppResult<Option<SecurityRecord>>;

    /// Find the member whose legacy-tagged record matches the given
    /// identifier (username OR email, case-sensitive) and password
    /// digest. A miss for any reason returns `None`.
    async fn find_legacy_member(
        &self,
        identifier: &str,
        password_digest: &str,
    ) -> AppResult<Option<Member>>;

    /// Store a reset token and its creation timestamp on the member's
    /// record, overwriting any prior token. Returns `false` if the
    /// member has no security record.
    async fn store_reset_token(
        &self,
        member_id: i64,
        token: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Atomically apply a [`PasswordChangeSet`] to the member's record.
    ///
    /// Both the hash/algorithm write and the token/timestamp clear must
    /// land in the same transaction; a partial write must never be
    /// observable. When `expected_token` is supplied, the update only
    /// applies while that exact token is still outstanding
    /// (compare-and-clear); returns `false` when no row matched.
    async fn commit_password_change(
        &self,
        member_id: i64,
        change: &PasswordChangeSet,
        expected_token: Option<&str>,
    ) -> AppResult<bool>;
}
