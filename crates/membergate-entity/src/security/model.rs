//! Security record model and the value objects that flow through the
//! reset-token lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::algorithm::HashAlgorithm;

/// Per-member security state, 1:1 with a member row.
///
/// Invariant: `reset_token` and `token_created_at` are both `None` or
/// both `Some`, never one without the other.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecurityRecord {
    /// Owning member's id (primary key and foreign key).
    pub member_id: i64,
    /// Algorithm-tagged password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Which verifier applies to `password_hash`.
    pub algorithm: HashAlgorithm,
    /// Outstanding password-reset token, if any. Unique when present.
    pub reset_token: Option<String>,
    /// When the outstanding token was issued.
    pub token_created_at: Option<DateTime<Utc>>,
}

impl SecurityRecord {
    /// Whether a reset token is currently outstanding.
    pub fn has_outstanding_token(&self) -> bool {
        self.reset_token.is_some()
    }
}

/// The complete, closed set of fields a password change is permitted to
/// write.
///
/// The change transaction accepts only this struct — never an arbitrary
/// field map — so a possessor of a valid reset token cannot reach any
/// other account attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeSet {
    /// The new password hash.
    pub password_hash: String,
    /// The algorithm the new hash was produced with.
    pub algorithm: HashAlgorithm,
    /// New reset token value (always `None` today: the change consumes
    /// the outstanding token).
    pub reset_token: Option<String>,
    /// New token timestamp (always `None` today, paired with
    /// `reset_token`).
    pub token_created_at: Option<DateTime<Utc>>,
}

impl PasswordChangeSet {
    /// A change set that installs the given hash and clears the
    /// outstanding reset token.
    pub fn new(password_hash: String, algorithm: HashAlgorithm) -> Self {
        Self {
            password_hash,
            algorithm,
            reset_token: None,
            token_created_at: None,
        }
    }
}

/// The proven result of validating a reset token.
///
/// Transient: produced by token verification and consumed immediately
/// by the password-change transaction, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedResetClaim {
    /// The member the token was issued for.
    pub member_id: i64,
    /// That member's email at verification time.
    pub email: String,
    /// The verified token itself.
    pub reset_token: String,
}
