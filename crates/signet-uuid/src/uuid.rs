//! The 16-byte UUID value and its canonical text form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use signet_core::{hex_decode, hex_encode};

use crate::error::{Result, UuidError};
use crate::layout::{VARIANT_BYTE, VERSION_BYTE};

/// Length of the canonical 8-4-4-4-12 text form.
pub const TEXT_LEN: usize = 36;

const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// A UUID as 16 raw bytes.
///
/// Serializes as its lowercase canonical text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Uuid(pub [u8; 16]);

impl Uuid {
    /// All zero bits.
    pub const NIL: Self = Self([0x00; 16]);

    /// All one bits.
    pub const MAX: Self = Self([0xff; 16]);

    /// Namespace for fully-qualified domain names.
    pub const NAMESPACE_DNS: Self = Self([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for URLs.
    pub const NAMESPACE_URL: Self = Self([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for ISO object identifiers.
    pub const NAMESPACE_OID: Self = Self([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace for X.500 distinguished names.
    pub const NAMESPACE_X500: Self = Self([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Parse the 8-4-4-4-12 form, in any letter case.
    pub fn parse(text: &str) -> Result<Self> {
        if !is_canonical_shape(text) {
            return Err(UuidError::InvalidUuid(text.to_string()));
        }
        let digits: String = text.chars().filter(|&c| c != '-').collect();
        let bytes = hex_decode(&digits).map_err(|_| UuidError::InvalidUuid(text.to_string()))?;
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// The raw version nibble, whatever its value.
    pub const fn version_nibble(&self) -> u8 {
        self.0[VERSION_BYTE] >> 4
    }

    pub fn variant(&self) -> Variant {
        Variant::from_byte(self.0[VARIANT_BYTE])
    }

    /// Canonical text with uppercase hex digits.
    pub fn to_string_upper(&self) -> String {
        let mut text = self.format();
        text.make_ascii_uppercase();
        text
    }

    /// Canonical text, uppercase when `uppercase` is set.
    pub fn to_text(&self, uppercase: bool) -> String {
        if uppercase {
            self.to_string_upper()
        } else {
            self.format()
        }
    }

    fn format(&self) -> String {
        let hex = hex_encode(&self.0, false);
        let mut text = String::with_capacity(TEXT_LEN);
        text.push_str(&hex[0..8]);
        text.push('-');
        text.push_str(&hex[8..12]);
        text.push('-');
        text.push_str(&hex[12..16]);
        text.push('-');
        text.push_str(&hex[16..20]);
        text.push('-');
        text.push_str(&hex[20..32]);
        text
    }
}

/// True if `text` is 36 characters with hyphens at 8, 13, 18 and 23 and hex
/// digits everywhere else.
pub fn is_canonical_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == TEXT_LEN
        && bytes.iter().enumerate().all(|(i, &b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({})", self.format())
    }
}

impl FromStr for Uuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uuid {
    type Error = UuidError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Uuid> for String {
    fn from(uuid: Uuid) -> Self {
        uuid.format()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Variant family, from the leading bits of byte 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Ncs,
    /// `10xx`: the layout every generator in this crate produces.
    Rfc4122,
    /// `110x`: reserved for Microsoft GUIDs.
    Microsoft,
    /// `111x`: reserved for future definition.
    Future,
}

impl Variant {
    pub const fn from_byte(byte: u8) -> Self {
        if byte & 0x80 == 0x00 {
            Variant::Ncs
        } else if byte & 0xc0 == 0x80 {
            Variant::Rfc4122
        } else if byte & 0xe0 == 0xc0 {
            Variant::Microsoft
        } else {
            Variant::Future
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Variant::Ncs => "NCS",
            Variant::Rfc4122 => "RFC4122",
            Variant::Microsoft => "Microsoft",
            Variant::Future => "Future",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
