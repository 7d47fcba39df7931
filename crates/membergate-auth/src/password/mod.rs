//! Password hashing, legacy verification, and policy enforcement.

pub mod hasher;
pub mod legacy;
pub mod validator;

pub use hasher::PasswordHasher;
pub use legacy::LegacyPasswordVerifier;
pub use validator::PasswordValidator;
