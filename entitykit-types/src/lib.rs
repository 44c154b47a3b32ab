//! Core type definitions for entitykit.
//!
//! This crate defines the small, entity-agnostic value types every other
//! crate in the workspace builds on:
//! - Entity, user and UUID identifiers
//! - Unix-second timestamps with a monotonic `tick`
//!
//! Anything specific to one entity type belongs with that type, not here.

mod ids;
mod timestamp;

pub use ids::{EntityId, EntityUuid, UserId};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
