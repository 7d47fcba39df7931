//! Lookup contract for the member directory.

use async_trait::async_trait;

use membergate_entity::member::Member;

use crate::result::AppResult;

/// Read-only directory of members.
///
/// Username and email matching is case-sensitive exact equality, the
/// semantics the legacy member tables were built on.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Find a member by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>>;

    /// Find a member by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>>;

    /// Find a member by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>>;
}
