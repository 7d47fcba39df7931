//! Login and password-reset orchestration.

pub mod service;

pub use service::SessionService;
