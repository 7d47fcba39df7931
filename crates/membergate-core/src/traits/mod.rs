//! Collaborator traits defined in `membergate-core` and implemented by
//! other crates.
//!
//! Every service component receives its collaborators through these
//! traits at construction time; there are no ambient singletons.

pub mod credential_store;
pub mod member_directory;
pub mod token_issuer;

pub use credential_store::CredentialStore;
pub use member_directory::MemberDirectory;
pub use token_issuer::TokenIssuer;
