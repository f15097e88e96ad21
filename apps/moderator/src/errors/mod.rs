//! Error handling for the moderator engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
