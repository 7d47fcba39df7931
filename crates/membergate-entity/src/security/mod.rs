//! Security record domain entities.

pub mod algorithm;
pub mod model;

pub use algorithm::HashAlgorithm;
pub use model::{PasswordChangeSet, SecurityRecord, VerifiedResetClaim};
