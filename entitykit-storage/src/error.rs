//! Error types for the storage layer.

use entitykit_model::{EntityError, Violation};
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The field validation layer rejected the record. The pre-save hook
    /// did not run.
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// The entity type's own code failed, including its pre-save hook.
    #[error("entity error: {0}")]
    Entity(#[from] EntityError),

    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// A new record carries a uuid that another stored record already has.
    #[error("duplicate uuid for {entity_type}: {uuid}")]
    DuplicateUuid { entity_type: String, uuid: String },

    /// Every id up to `u64::MAX` has been assigned.
    #[error("no ids left for entity type {0}")]
    IdsExhausted(String),

    #[error("entity type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The descriptor contradicts the type's field definitions.
    #[error("invalid entity type '{entity_type}': {reason}")]
    InvalidDescriptor { entity_type: String, reason: String },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),


    /// A thread panicked while holding the store lock.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
