//! JWT claims structure for member session credentials.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the member ID.
    pub sub: i64,
    /// The member's email at issuance time.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID.
    pub jti: Uuid,
    /// Boolean action markers carried for audit purposes, e.g.
    /// `"resetPassword": true`.
    #[serde(flatten)]
    pub actions: BTreeMap<String, bool>,
}

impl Claims {
    /// Returns the member ID from the subject claim.
    pub fn member_id(&self) -> i64 {
        self.sub
    }

    /// Checks whether this credential has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Whether the credential carries the given action marker.
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.get(action).copied().unwrap_or(false)
    }
}
