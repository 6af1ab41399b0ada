//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache, its wrappers and the backing store.
///
/// Absence of a key is never an error; lookups return `Option` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Operation applied to a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Increment of a value that is not an integer
    #[error("Value is not an integer: {0}")]
    NotAnInteger(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Argument or result could not be serialized into history
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying page fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A wrapped operation reported a failure
    #[error("Operation failed: {0}")]
    Operation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
