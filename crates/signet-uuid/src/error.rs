//! Error types for UUID generation and parsing.

use thiserror::Error;

/// Errors that can occur while generating or parsing UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UuidError {
    /// Version outside {1, 3, 4, 5, 6, 7, 8}. Version 2 is deliberately absent.
    #[error("unsupported UUID version {0}: expected one of 1, 3, 4, 5, 6, 7, 8")]
    UnsupportedVersion(u8),

    /// A version string that is not a number or `vN`.
    #[error("unrecognized UUID version: {0:?}")]
    InvalidVersion(String),

    /// Name-based generation with a namespace that is not a UUID.
    #[error("namespace is not a valid UUID: {0:?}")]
    InvalidNamespace(String),

    #[error("UUID version {0} requires a namespace")]
    MissingNamespace(u8),

    #[error("UUID version {0} requires a name")]
    MissingName(u8),

    #[error("not a UUID: {0:?}")]
    InvalidUuid(String),
}

/// Result type for UUID operations.
pub type Result<T> = std::result::Result<T, UuidError>;
