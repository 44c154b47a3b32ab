//! Errors raised by entity types and their lifecycle hooks.

use thiserror::Error;

/// Result type for entity-level operations.
pub type EntityResult<T> = Result<T, EntityError>;

#[derive(Debug, Error)]
pub enum EntityError {
    /// A record reached the save pipeline without a bundle.
    #[error("entity of type '{0}' has no bundle")]
    MissingBundle(String),

    /// A field value could not be converted into the record's typed field.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("unknown link template: {0}")]
    UnknownLinkTemplate(String),

    #[error("link template '{rel}' requires parameter '{param}'")]
    MissingLinkParameter { rel: String, param: String },
}

impl EntityError {
    /// Shorthand for [`EntityError::InvalidFieldValue`].
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
