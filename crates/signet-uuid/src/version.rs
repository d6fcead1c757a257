//! Supported UUID versions.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UuidError};

/// A UUID version this crate can generate. Version 2 (DCE security) is not
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum UuidVersion {
    /// Gregorian time, clock sequence and node.
    V1 = 1,
    /// MD5 name-based.
    V3 = 3,
    /// Random.
    #[default]
    V4 = 4,
    /// SHA-1 name-based.
    V5 = 5,
    /// Reordered Gregorian time.
    V6 = 6,
    /// Unix milliseconds and randomness.
    V7 = 7,
    /// Unix milliseconds and caller-defined bits.
    V8 = 8,
}

impl UuidVersion {
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Whether the version embeds a timestamp.
    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            UuidVersion::V1 | UuidVersion::V6 | UuidVersion::V7 | UuidVersion::V8
        )
    }

    /// Whether the version hashes a namespace and name.
    pub const fn is_name_based(self) -> bool {
        matches!(self, UuidVersion::V3 | UuidVersion::V5)
    }
}

impl TryFrom<u8> for UuidVersion {
    type Error = UuidError;

    fn try_from(n: u8) -> Result<Self> {
        match n {
            1 => Ok(UuidVersion::V1),
            3 => Ok(UuidVersion::V3),
            4 => Ok(UuidVersion::V4),
            5 => Ok(UuidVersion::V5),
            6 => Ok(UuidVersion::V6),
            7 => Ok(UuidVersion::V7),
            8 => Ok(UuidVersion::V8),
            other => Err(UuidError::UnsupportedVersion(other)),
        }
    }
}

/// Accepts `"4"`, `"v4"` and `"V4"`.
impl FromStr for UuidVersion {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let n: u8 = digits
            .parse()
            .map_err(|_| UuidError::InvalidVersion(s.to_string()))?;
        UuidVersion::try_from(n)
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}
