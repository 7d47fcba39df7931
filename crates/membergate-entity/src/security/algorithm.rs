//! Password hashing algorithm tag.

use serde::{Deserialize, Serialize};

/// Which verifier applies to a stored password hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "hash_algorithm", rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// Legacy fast-hash (unsalted MD5), retained for pre-migration
    /// accounts.
    LegacyMd5,
    /// Modern salted hash (argon2id).
    Modern,
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LegacyMd5 => write!(f, "legacy_md5"),
            Self::Modern => write!(f, "modern"),
        }
    }
}
