//! Error types for the Signet facade.

use signet_core::CodecError;
use signet_token::{TokenError, VerificationFailure};
use signet_uuid::UuidError;
use thiserror::Error;

/// Errors that can occur during Signet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignetError {
    /// Byte codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// UUID generation or parsing error.
    #[error("uuid error: {0}")]
    Uuid(#[from] UuidError),

    /// Token error. Verification failures keep their message unchanged.
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl SignetError {
    /// The verification failure, if this error is one.
    pub fn verification_failure(&self) -> Option<&VerificationFailure> {
        match self {
            SignetError::Token(TokenError::Verification(failure)) => Some(failure),
            _ => None,
        }
    }
}

impl From<VerificationFailure> for SignetError {
    fn from(failure: VerificationFailure) -> Self {
        SignetError::Token(TokenError::Verification(failure))
    }
}

/// Result type for Signet operations.
pub type Result<T> = std::result::Result<T, SignetError>;
