//! Concrete repository implementations.

pub mod member;
pub mod security;

pub use member::MemberRepository;
pub use security::SecurityRepository;
