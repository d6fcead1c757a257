//! Duration expressions for `expires_in` and `not_before`.
//!
//! Accepted forms:
//!
//! | Expression | Meaning |
//! |---|---|
//! | `"90"`, `90` | 90 seconds |
//! | `"500ms"` | 500 milliseconds |
//! | `"30s"`, `"15m"`, `"1h"`, `"2d"`, `"1w"`, `"1y"` | short units |
//! | `"2 days"`, `"1 hour"`, `"10 mins"` | long units, optional space |
//! | `"1.5h"`, `"-1h"` | decimals and negatives |
//!
//! Units are case-insensitive. A year is 365.25 days.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TokenError};

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const YEAR: f64 = 365.25 * DAY;

/// A signed offset from "now", in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenDuration(i64);

impl TokenDuration {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Parse a duration expression.
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = || TokenError::InvalidDuration(expr.to_string());
        let trimmed = expr.trim();

        let split = trimmed
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
            .map_or(trimmed.len(), |(i, _)| i);
        let (number, unit) = trimmed.split_at(split);

        let value: f64 = number.parse().map_err(|_| invalid())?;
        let scale = unit_millis(unit.trim_start()).ok_or_else(invalid)?;
        let millis = (value * scale).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(invalid());
        }
        Ok(Self(millis as i64))
    }
}

fn unit_millis(unit: &str) -> Option<f64> {
    let scale = match unit.to_ascii_lowercase().as_str() {
        "" => SECOND,
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };
    Some(scale)
}

impl FromStr for TokenDuration {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TokenDuration {
    type Error = TokenError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A bare number is seconds.
impl From<i64> for TokenDuration {
    fn from(secs: i64) -> Self {
        Self::from_secs(secs)
    }
}

impl From<Duration> for TokenDuration {
    fn from(duration: Duration) -> Self {
        Self(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for TokenDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
