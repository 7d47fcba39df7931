//! # membergate-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations of the Membergate collaborator traits.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
