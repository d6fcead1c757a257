//! Error types for token signing, decoding and verification.

use std::fmt;

use signet_core::CodecError;
use thiserror::Error;

/// One of the three dot-separated token segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        })
    }
}

/// Why a token failed verification.
///
/// Signature and structure failures mean the token could not be
/// authenticated. Claim violations are only reported for authenticated
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("Malformed token: {reason}")]
    Malformed { reason: String },

    #[error("Invalid token signature!")]
    InvalidSignature,

    #[error("Token has expired!")]
    Expired { exp: i64 },

    #[error("Token is not yet valid!")]
    NotYetValid { nbf: i64 },

    #[error("Invalid token issuer!")]
    InvalidIssuer,

    #[error("Invalid token audience!")]
    InvalidAudience,

    #[error("Invalid token subject!")]
    InvalidSubject,
}

impl VerificationFailure {
    /// Signature mismatch or unreadable structure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            VerificationFailure::Malformed { .. } | VerificationFailure::InvalidSignature
        )
    }

    /// A registered claim rejected an authenticated token.
    pub fn is_claim_violation(&self) -> bool {
        !self.is_authentication_failure()
    }
}

/// Errors that can occur while signing or decoding tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token: expected 3 segments, found {segments}")]
    MalformedToken { segments: usize },

    #[error("invalid base64 in token {segment}: {source}")]
    InvalidEncoding {
        segment: Segment,
        #[source]
        source: CodecError,
    },

    #[error("invalid JSON in token {segment}: {message}")]
    InvalidJson { segment: Segment, message: String },

    #[error("token payload must be a JSON object")]
    PayloadNotObject,

    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("invalid duration expression: {0:?}")]
    InvalidDuration(String),

    #[error(transparent)]
    Verification(#[from] VerificationFailure),
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
