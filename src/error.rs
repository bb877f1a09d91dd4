//! Error types for mapping nodes and value coercion.

use thiserror::Error;

/// A specialized `Result` type for mapping node operations.
pub type MapsResult<T> = Result<T, MapsError>;

/// Errors raised by [`Maps`](crate::Maps) and the coercion helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapsError {
    /// An argument had an acceptable type but an unusable value, or the
    /// positional construction source was not a mapping.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A key was read or deleted but is not present.
    #[error("Key not found: '{0}'")]
    KeyNotFound(String),

    /// An operand or input had the wrong type for the operation.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Two values cannot be ordered relative to each other.
    #[error("'{op}' not supported between instances of '{left}' and '{right}'")]
    Incomparable {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

impl MapsError {
    /// Create an InvalidArgument error from a message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a KeyNotFound error for a key.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound(key.into())
    }

    /// Create a TypeMismatch error from a message.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch(message.into())
    }
}
