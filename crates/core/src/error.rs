//! Unified error types for tagstore.
//!
//! This module provides the canonical error type for all store operations.
//! Validation and not-found conditions are expected and recoverable;
//! I/O and serialization failures mean a mutation did not durably succeed.

use thiserror::Error;

/// All tagstore errors.
///
/// Absent keys in `delete`/tag operations are reported as `Ok(false)`
/// rather than [`Error::NotFound`]; the variant exists for callers that
/// need to surface a missing key as a hard error.
#[derive(Debug, Error)]
pub enum Error {
    /// Key violates length or shape constraints
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The offending key
        key: String,
        /// Why the key was rejected
        reason: String,
    },

    /// Value violates length constraints
    #[error("invalid value: {reason}")]
    InvalidValue {
        /// Why the value was rejected
        reason: String,
    },

    /// Entity not found (key or tag)
    #[error("not found: {0}")]
    NotFound(String),

    /// I/O error (durable write or backup listing failed)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for tagstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a validation error.
    ///
    /// Validation errors are reported synchronously and leave the store
    /// unmodified.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidKey { .. } | Error::InvalidValue { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error means a mutation may not have been persisted.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Serialization(_))
    }
}
