//! # Signet
//!
//! The unified API for Signet: from-scratch digests and HMAC, byte codecs,
//! RFC 4122 UUIDs and compact HMAC-signed tokens.
//!
//! ## Overview
//!
//! - **Codecs**: UTF-8, hex, Base64 and binary-string encode/decode
//! - **Digests**: SHA-256, plus SHA-1 and MD5 for name-based UUIDs
//! - **MAC**: HMAC-SHA256 with constant-time verification
//! - **UUIDs**: versions 1, 3, 4, 5, 6, 7 and 8, with decoding
//! - **Tokens**: `header.payload.signature`, JWT-shaped, HS256 only
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signet::{SignOptions, Toolkit, ToolkitConfig, VerifyOptions};
//!
//! fn example() -> signet::Result<()> {
//!     let toolkit = Toolkit::new("a long random secret", ToolkitConfig::default())?;
//!
//!     let token = toolkit.sign(
//!         &serde_json::json!({ "sub": "u1" }),
//!         SignOptions::new().expires_in(3600i64).issuer("svc"),
//!     )?;
//!
//!     let payload = toolkit.verify_or_throw(&token, VerifyOptions::new().issuer("svc"))?;
//!     assert_eq!(payload["sub"], "u1");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `signet::core` - codecs, digests, HMAC, clock and entropy seams
//! - `signet::uuid` - UUID generation and decoding
//! - `signet::token` - token signing and verification

pub mod error;
pub mod toolkit;

// Re-export component crates
pub use signet_core as core;
pub use signet_token as token;
pub use signet_uuid as uuid;

// Re-export main types for convenience
pub use error::{Result, SignetError};
pub use toolkit::{IssuedToken, Toolkit, ToolkitConfig, JTI};

// Re-export commonly used component types
pub use signet_core::{
    base64_decode, base64_encode, binary_decode, binary_encode, constant_time_eq, hex_decode,
    hex_encode, hmac_sha256, md5, sha1, sha256, utf8_decode, utf8_encode, verify_hmac_sha256,
    Clock, CodecError, EntropySource, FixedClock, SecretKey, SeededEntropy, SystemClock,
    ThreadEntropy,
};
pub use signet_token::{
    Audience, DecodedToken, Payload, SignOptions, Signet, TokenDuration, TokenError,
    Verification, VerificationFailure, VerifyOptions,
};
pub use signet_uuid::{
    DecodedUuid, Uuid, UuidError, UuidGenerator, UuidOptions, UuidVersion, Variant,
};
