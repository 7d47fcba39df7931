//! # membergate-auth
//!
//! Authentication and credential lifecycle logic for Membergate:
//!
//! - `jwt` — session credential (JWT) issuance and validation
//! - `password` — legacy MD5 verification, argon2id hashing, and
//!   password policy enforcement
//! - `reset` — reset-token issuance/verification and the atomic
//!   password-change transaction
//! - `session` — login and password-reset orchestration

pub mod jwt;
pub mod password;
pub mod reset;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{LegacyPasswordVerifier, PasswordHasher, PasswordValidator};
pub use reset::{PasswordAction, PasswordChangeTransaction, ResetTokenService};
pub use session::SessionService;
