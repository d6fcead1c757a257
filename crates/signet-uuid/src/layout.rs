//! Bit-field layout of the 16-byte UUID.
//!
//! Every field is addressed through the offsets below. The time-based
//! versions store a 60-bit count of 100ns ticks since 1582-10-15 (v1, v6)
//! or a 48-bit Unix millisecond count (v7, v8).
//!
//! ```text
//!  byte:   0  1  2  3   4  5   6  7   8  9   10 11 12 13 14 15
//!  v1:   [ time_low  ] [mid ] [V|hi] [Vr|seq] [      node       ]
//!  v6:   [ time_high ] [mid ] [V|lo] [Vr|seq] [      node       ]
//!  v7:   [   unix_ms (48)   ] [V|  rand_a / rand_b (74 bits)    ]
//! ```

use std::ops::Range;

/// Byte carrying the version nibble in its high half.
pub const VERSION_BYTE: usize = 6;

/// Byte carrying the variant pattern in its top bits.
pub const VARIANT_BYTE: usize = 8;

/// Clock sequence (v1, v6), 14 bits after the variant.
pub const CLOCK_SEQ: Range<usize> = 8..10;

/// Node identifier (v1, v6).
pub const NODE: Range<usize> = 10..16;

/// Unix millisecond timestamp (v7, v8).
pub const UNIX_MS: Range<usize> = 0..6;

/// 100ns intervals between 1582-10-15 and 1970-01-01.
pub const GREGORIAN_OFFSET_100NS: i64 = 122_192_928_000_000_000;

/// 100ns ticks per millisecond.
pub const TICKS_PER_MS: i64 = 10_000;

/// Least significant bit of the first node octet.
pub const MULTICAST_BIT: u8 = 0x01;

const TICKS_MASK: u64 = (1 << 60) - 1;
const UNIX_MS_MASK: u64 = (1 << 48) - 1;
const CLOCK_SEQ_MASK: u16 = 0x3fff;

/// Overwrite the version nibble.
pub fn set_version(bytes: &mut [u8; 16], version: u8) {
    bytes[VERSION_BYTE] = (bytes[VERSION_BYTE] & 0x0f) | (version << 4);
}

/// Force the `10` variant into the top two bits of the variant byte.
pub fn set_rfc4122_variant(bytes: &mut [u8; 16]) {
    bytes[VARIANT_BYTE] = (bytes[VARIANT_BYTE] & 0x3f) | 0x80;
}

/// Gregorian ticks for a Unix millisecond time plus a sub-millisecond offset.
///
/// Wraps modulo 2^60 outside the representable range (before 1582 or after
/// 5236).
pub fn gregorian_ticks(unix_ms: i64, sub_ms_ticks: u16) -> u64 {
    let ticks = i128::from(unix_ms) * i128::from(TICKS_PER_MS)
        + i128::from(GREGORIAN_OFFSET_100NS)
        + i128::from(sub_ms_ticks);
    ticks.rem_euclid(1 << 60) as u64
}

/// Unix milliseconds for a Gregorian tick count, rounding toward -inf.
pub fn ticks_to_unix_ms(ticks: u64) -> i64 {
    let ticks = (ticks & TICKS_MASK) as i64;
    (ticks - GREGORIAN_OFFSET_100NS).div_euclid(TICKS_PER_MS)
}

/// Store ticks in v1 order: low 32 bits first, then middle 16, then high 12.
pub fn write_v1_time(bytes: &mut [u8; 16], ticks: u64) {
    let ticks = ticks & TICKS_MASK;
    bytes[0..4].copy_from_slice(&(ticks as u32).to_be_bytes());
    bytes[4..6].copy_from_slice(&((ticks >> 32) as u16).to_be_bytes());
    bytes[6..8].copy_from_slice(&(((ticks >> 48) as u16) & 0x0fff).to_be_bytes());
}

pub fn read_v1_time(bytes: &[u8; 16]) -> u64 {
    let low = u64::from(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
    let mid = u64::from(u16::from_be_bytes([bytes[4], bytes[5]]));
    let high = u64::from(u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff);
    (high << 48) | (mid << 32) | low
}

/// Store ticks in v6 order: most significant bits first, so byte order
/// sorts by time.
pub fn write_v6_time(bytes: &mut [u8; 16], ticks: u64) {
    let ticks = ticks & TICKS_MASK;
    bytes[0..4].copy_from_slice(&((ticks >> 28) as u32).to_be_bytes());
    bytes[4..6].copy_from_slice(&((ticks >> 12) as u16).to_be_bytes());
    bytes[6..8].copy_from_slice(&((ticks as u16) & 0x0fff).to_be_bytes());
}

pub fn read_v6_time(bytes: &[u8; 16]) -> u64 {
    let high = u64::from(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
    let mid = u64::from(u16::from_be_bytes([bytes[4], bytes[5]]));
    let low = u64::from(u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff);
    (high << 28) | (mid << 12) | low
}

/// Store the low 48 bits of `unix_ms` big-endian in bytes 0..6.
pub fn write_unix_ms(bytes: &mut [u8; 16], unix_ms: i64) {
    let ms = (unix_ms as u64) & UNIX_MS_MASK;
    bytes[UNIX_MS].copy_from_slice(&ms.to_be_bytes()[2..]);
}

pub fn read_unix_ms(bytes: &[u8; 16]) -> i64 {
    let mut be = [0u8; 8];
    be[2..].copy_from_slice(&bytes[UNIX_MS]);
    u64::from_be_bytes(be) as i64
}

/// Store a 14-bit clock sequence. The variant bits are set at the same time.
pub fn write_clock_seq(bytes: &mut [u8; 16], seq: u16) {
    let seq = seq & CLOCK_SEQ_MASK;
    bytes[CLOCK_SEQ].copy_from_slice(&seq.to_be_bytes());
    set_rfc4122_variant(bytes);
}

pub fn read_clock_seq(bytes: &[u8; 16]) -> u16 {
    u16::from_be_bytes([bytes[CLOCK_SEQ.start], bytes[CLOCK_SEQ.start + 1]]) & CLOCK_SEQ_MASK
}

pub fn read_node(bytes: &[u8; 16]) -> [u8; 6] {
    let mut node = [0u8; 6];
    node.copy_from_slice(&bytes[NODE]);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 9562 appendix A: 2022-02-22 14:22:22.00 UTC.
    const EXAMPLE_TICKS: u64 = 0x1EC_9414_C232_AB00;
    const EXAMPLE_MS: i64 = 1_645_557_742_000;

    #[test]
    fn test_example_ticks_convert_to_unix_ms() {
        assert_eq!(ticks_to_unix_ms(EXAMPLE_TICKS), EXAMPLE_MS);
        assert_eq!(gregorian_ticks(EXAMPLE_MS, 0), EXAMPLE_TICKS);
    }

    #[test]
    fn test_sub_ms_ticks_floor_to_same_ms() {
        assert_eq!(ticks_to_unix_ms(gregorian_ticks(EXAMPLE_MS, 9_999)), EXAMPLE_MS);
        assert_eq!(ticks_to_unix_ms(gregorian_ticks(0, 0)), 0);
        assert_eq!(ticks_to_unix_ms(gregorian_ticks(-1, 5)), -1);
    }

    #[test]
    fn test_v1_time_layout() {
        let mut bytes = [0u8; 16];
        write_v1_time(&mut bytes, EXAMPLE_TICKS);
        assert_eq!(&bytes[..8], &[0xC2, 0x32, 0xAB, 0x00, 0x94, 0x14, 0x01, 0xEC]);
        assert_eq!(read_v1_time(&bytes), EXAMPLE_TICKS);
    }

    #[test]
    fn test_v6_time_layout() {
        let mut bytes = [0u8; 16];
        write_v6_time(&mut bytes, EXAMPLE_TICKS);
        assert_eq!(&bytes[..8], &[0x1E, 0xC9, 0x41, 0x4C, 0x23, 0x2A, 0x0B, 0x00]);
        assert_eq!(read_v6_time(&bytes), EXAMPLE_TICKS);
    }

    #[test]
    fn test_version_survives_time_write() {
        let mut bytes = [0u8; 16];
        write_v6_time(&mut bytes, TICKS_MASK);
        set_version(&mut bytes, 6);
        assert_eq!(bytes[VERSION_BYTE] >> 4, 6);
        assert_eq!(read_v6_time(&bytes), TICKS_MASK);
    }

    #[test]
    fn test_unix_ms_layout() {
        let mut bytes = [0xffu8; 16];
        write_unix_ms(&mut bytes, 0x017F_22E2_79B0);
        assert_eq!(&bytes[..6], &[0x01, 0x7F, 0x22, 0xE2, 0x79, 0xB0]);
        assert_eq!(bytes[6], 0xff);
        assert_eq!(read_unix_ms(&bytes), 0x017F_22E2_79B0);
    }

    #[test]
    fn test_clock_seq_keeps_variant() {
        let mut bytes = [0u8; 16];
        write_clock_seq(&mut bytes, 0xffff);
        assert_eq!(bytes[VARIANT_BYTE] & 0xc0, 0x80);
        assert_eq!(read_clock_seq(&bytes), 0x3fff);

        write_clock_seq(&mut bytes, 0x33c8);
        assert_eq!(&bytes[CLOCK_SEQ], &[0xB3, 0xC8]);
        assert_eq!(read_clock_seq(&bytes), 0x33c8);
    }

    #[test]
    fn test_variant_overwrites_only_top_bits() {
        let mut bytes = [0xffu8; 16];
        set_rfc4122_variant(&mut bytes);
        assert_eq!(bytes[VARIANT_BYTE], 0xbf);

        let mut bytes = [0u8; 16];
        set_rfc4122_variant(&mut bytes);
        assert_eq!(bytes[VARIANT_BYTE], 0x80);
    }
}
