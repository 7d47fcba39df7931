//! Member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered member.
///
/// The member itself carries no credentials; those live in the 1:1
/// [`SecurityRecord`](crate::security::SecurityRecord), which is
/// cascade-owned by the member row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// When the member was created.
    pub created_at: DateTime<Utc>,
}
