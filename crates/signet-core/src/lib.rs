//! # Signet Core
//!
//! Pure primitives for Signet: byte codecs, hash functions, HMAC, and
//! constant-time comparison.
//!
//! This crate contains no I/O. Every function is a synchronous transform of
//! its inputs; time and randomness enter only through the [`Clock`] and
//! [`EntropySource`] seams.
//!
//! ## Modules
//!
//! - [`codec`] - UTF-8, hex, Base64 and binary-string encode/decode
//! - [`sha256`], [`sha1`], [`md5`] - 64-byte-block hash functions
//! - [`hmac`] - HMAC generic over any [`BlockHash`]
//! - [`crypto`] - [`SecretKey`] and [`constant_time_eq`]
//! - [`source`] - clock and entropy seams
//!
//! SHA-1 and MD5 exist only for name-based UUIDs (v5 and v3).

pub mod codec;
pub mod crypto;
pub mod digest;
pub mod error;
pub mod hmac;
pub mod md5;
pub mod sha1;
pub mod sha256;
pub mod source;

pub use codec::{
    base64_decode, base64_encode, binary_decode, binary_encode, hex_decode, hex_encode,
    utf8_decode, utf8_encode, utf8_encode_utf16,
};
pub use crypto::{constant_time_eq, SecretKey};
pub use digest::BlockHash;
pub use error::CodecError;
pub use hmac::{hmac, hmac_sha256, verify_hmac_sha256};
pub use md5::{md5, Md5};
pub use sha1::{sha1, Sha1};
pub use sha256::{sha256, Sha256};
pub use source::{Clock, EntropySource, FixedClock, SeededEntropy, SystemClock, ThreadEntropy};
