//! Security record repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use membergate_core::error::{AppError, ErrorKind};
use membergate_core::result::AppResult;
use membergate_core::traits::CredentialStore;
use membergate_entity::member::Member;
use membergate_entity::security::{PasswordChangeSet, SecurityRecord};

/// PostgreSQL-backed credential store.
#[derive(Debug, Clone)]
pub struct SecurityRepository {
    pool: PgPool,
}

impl SecurityRepository {
    /// Create a new security repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SecurityRepository {
    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Option<SecurityRecord>> {
        sqlx::query_as::<_, SecurityRecord>(
            "SELECT * FROM members_security WHERE member_id = $1",
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find security record", e)
        })
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<SecurityRecord>> {
        sqlx::query_as::<_, SecurityRecord>(
            "SELECT * FROM members_security WHERE reset_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find record by token", e)
        })
    }

    async fn find_by_member_and_email(
        &self,
        member_id: i64,
        email: &str,
    ) -> AppResult<Option<SecurityRecord>> {
        sqlx::query_as::<_, SecurityRecord>(
            "SELECT s.* FROM members_security s \
             JOIN members m ON m.id = s.member_id \
             WHERE s.member_id = $1 AND m.email = $2",
        )
        .bind(member_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find record by member and email",
                e,
            )
        })
    }

    async fn find_legacy_member(
        &self,
        identifier: &str,
        password_digest: &str,
    ) -> AppResult<Option<Member>> {
        // Single point query; the digest comparison happens in the
        // WHERE clause so a miss never distinguishes "no such member"
        // from "wrong password".
        sqlx::query_as::<_, Member>(
            "SELECT m.* FROM members m \
             JOIN members_security s ON s.member_id = m.id \
             WHERE s.algorithm = 'legacy_md5' \
               AND (m.username = $1 OR m.email = $1) \
               AND s.password_hash = $2",
        )
        .bind(identifier)
        .bind(password_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed legacy credential lookup", e)
        })
    }

    async fn store_reset_token(
        &self,
        member_id: i64,
        token: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE members_security SET reset_token = $2, token_created_at = $3 \
             WHERE member_id = $1",
        )
        .bind(member_id)
        .bind(token)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store reset token", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit_password_change(
        &self,
        member_id: i64,
        change: &PasswordChangeSet,
        expected_token: Option<&str>,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // One statement writes the full change set so no reader can
        // observe the hash changed with the token still outstanding.
        // With an expected token the WHERE clause doubles as a
        // compare-and-clear: a concurrently consumed token yields zero
        // rows instead of a blind overwrite.
        let result = match expected_token {
            Some(token) => sqlx::query(
                "UPDATE members_security \
                 SET password_hash = $2, algorithm = $3, reset_token = $4, token_created_at = $5 \
                 WHERE member_id = $1 AND reset_token = $6",
            )
            .bind(member_id)
            .bind(&change.password_hash)
            .bind(change.algorithm)
            .bind(&change.reset_token)
            .bind(change.token_created_at)
            .bind(token)
            .execute(&mut *tx)
            .await,
            None => sqlx::query(
                "UPDATE members_security \
                 SET password_hash = $2, algorithm = $3, reset_token = $4, token_created_at = $5 \
                 WHERE member_id = $1",
            )
            .bind(member_id)
            .bind(&change.password_hash)
            .bind(change.algorithm)
            .bind(&change.reset_token)
            .bind(change.token_created_at)
            .execute(&mut *tx)
            .await,
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit password change", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        debug!(
            member_id,
            rows = result.rows_affected(),
            "Password change committed"
        );

        Ok(result.rows_affected() > 0)
    }
}
