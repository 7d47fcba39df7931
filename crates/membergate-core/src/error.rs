//! Unified application error types for Membergate.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Callers dispatch on
//! [`ErrorKind`], which carries the full authentication-failure
//! taxonomy: every user-driven failure has its own kind so that the
//! service layer can produce a distinct, non-leaking message for each.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested member or credential was not found. At the
    /// verifier boundary this is deliberately indistinguishable from
    /// "wrong credential".
    NotFound,
    /// No security record holds the presented reset token (never
    /// issued, or already consumed).
    TokenCorrupted,
    /// The reset token exists but its TTL has elapsed.
    TokenExpired,
    /// The reset token was presented for a different email than the
    /// one it was issued for.
    TokenEmailMismatch,
    /// The caller-supplied email does not match the verified claim.
    EmailMismatch,
    /// A security record holds the token but no owning member exists
    /// (data-integrity fault, not user error).
    OrphanedToken,
    /// No security record matches the verified member identity and
    /// email conjunction.
    AccountNotFound,
    /// Input validation failed (e.g. password confirmation mismatch).
    Validation,
    /// The presented session credential (JWT) has expired.
    SessionExpired,
    /// The presented session credential is missing, malformed, or
    /// fails signature verification.
    SessionInvalid,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::TokenCorrupted => write!(f, "TOKEN_CORRUPTED"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenEmailMismatch => write!(f, "TOKEN_EMAIL_MISMATCH"),
            Self::EmailMismatch => write!(f, "EMAIL_MISMATCH"),
            Self::OrphanedToken => write!(f, "ORPHANED_TOKEN"),
            Self::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::SessionExpired => write!(f, "SESSION_EXPIRED"),
            Self::SessionInvalid => write!(f, "SESSION_INVALID"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Membergate.
///
/// All crate-specific errors are mapped into `AppError` using `From`
/// impls or explicit `.map_err()` calls. This provides a single error
/// type for the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a corrupted-token error.
    pub fn token_corrupted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenCorrupted, message)
    }

    /// Create an expired-token error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a token-email-mismatch error.
    pub fn token_email_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenEmailMismatch, message)
    }

    /// Create an email-mismatch error.
    pub fn email_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmailMismatch, message)
    }

    /// Create an orphaned-token error.
    pub fn orphaned_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OrphanedToken, message)
    }

    /// Create an account-not-found error.
    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountNotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an expired-session error.
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionExpired, message)
    }

    /// Create an invalid-session error.
    pub fn session_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionInvalid, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
