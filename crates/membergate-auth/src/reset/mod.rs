//! Password-reset token lifecycle and the password-change transaction.

pub mod change;
pub mod service;

pub use change::{PasswordAction, PasswordChangeTransaction};
pub use service::ResetTokenService;
