//! Secret key material and constant-time comparison.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hmac::hmac_sha256;
use crate::sha256::SHA256_LEN;
use crate::source::{EntropySource, ThreadEntropy};

/// Compare two byte strings in time independent of their contents.
///
/// Only a length mismatch returns early. Equal-length inputs are compared
/// with `subtle`, so timing does not reveal the position of the first
/// difference.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// An HMAC signing secret.
///
/// Owned and never copied implicitly. The bytes are wiped on drop, `Debug`
/// prints only the length, and there is no accessor for the raw material:
/// the key can only be used to compute or check a MAC.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wrap caller-supplied key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Generate `len` random bytes from the thread-local CSPRNG.
    pub fn random(len: usize) -> Self {
        Self::from_source(&ThreadEntropy, len)
    }

    /// Generate `len` bytes from the given entropy source.
    pub fn from_source(source: &impl EntropySource, len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        source.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the key has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// HMAC-SHA256 of `message` under this key.
    pub fn sign(&self, message: &[u8]) -> [u8; SHA256_LEN] {
        hmac_sha256(&self.bytes, message)
    }

    /// Check `tag` against the HMAC-SHA256 of `message` in constant time.
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        constant_time_eq(&self.sign(message), tag)
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<&[u8]> for SecretKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(len={})", self.bytes.len())
    }
}
