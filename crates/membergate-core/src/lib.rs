//! # membergate-core
//!
//! Core crate for Membergate. Contains the unified error system,
//! configuration schemas, logging initialization, and the collaborator
//! traits (`CredentialStore`, `MemberDirectory`, `TokenIssuer`) that the
//! outer crates implement.
//!
//! The only internal dependency is `membergate-entity`, which supplies
//! the domain models the traits speak in.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
