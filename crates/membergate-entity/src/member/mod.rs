//! Member domain entities.

pub mod model;

pub use model::Member;
