//! Error types for the Signet core codecs.

use thiserror::Error;

/// Errors produced by the byte codecs.
///
/// Codecs are best-effort: malformed input is reported through this type and
/// never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("odd number of hex digits: {0}")]
    OddLength(usize),

    #[error("invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },

    #[error("invalid base64 character {character:?} at position {position}")]
    InvalidBase64Character { character: char, position: usize },

    #[error("invalid base64 length: {0}")]
    InvalidBase64Length(usize),

    #[error("invalid base64 padding")]
    InvalidPadding,

    #[error("invalid binary character {character:?} at position {position}")]
    InvalidBinaryCharacter { character: char, position: usize },

    #[error("binary string length {0} is not a multiple of 8")]
    InvalidBinaryLength(usize),

    #[error("invalid utf-8 sequence at byte {0}")]
    InvalidUtf8(usize),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
