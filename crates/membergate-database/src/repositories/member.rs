//! Member directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use membergate_core::error::{AppError, ErrorKind};
use membergate_core::result::AppResult;
use membergate_core::traits::MemberDirectory;
use membergate_entity::member::Member;

/// PostgreSQL-backed member directory.
///
/// Matching on username and email is case-sensitive exact equality —
/// the legacy member tables were populated under those semantics and a
/// looser match could resolve a different account.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberDirectory for MemberRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member by id", e)
            })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member by username", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member by email", e)
            })
    }
}
