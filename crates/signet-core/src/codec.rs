//! Byte codecs: UTF-8, hex, Base64 and binary strings.
//!
//! These are best-effort transforms. Encoding never fails; decoding reports
//! malformed input as a [`CodecError`] instead of silently truncating.

use crate::error::{CodecError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_PAD: u8 = b'=';
const INVALID: u8 = 0xff;
const BASE64_DECODE: [u8; 256] = build_base64_decode_table();

const fn build_base64_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < BASE64_ALPHABET.len() {
        table[BASE64_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

// ─────────────────────────────────────────────────────────────────────────────
// UTF-8
// ─────────────────────────────────────────────────────────────────────────────

/// Encode a string as UTF-8 bytes.
pub fn utf8_encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        push_code_point(&mut out, ch as u32);
    }
    out
}

/// Encode UTF-16 code units as UTF-8.
///
/// Surrogate pairs are combined into a single 4-byte sequence. Lone or
/// out-of-order surrogates are dropped, so this is lossy for ill-formed input.
pub fn utf8_encode_utf16(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * 3);
    let mut i = 0;
    while i < units.len() {
        let unit = units[i] as u32;
        match unit {
            0xd800..=0xdbff => {
                match units.get(i + 1).map(|&u| u as u32) {
                    Some(low @ 0xdc00..=0xdfff) => {
                        let cp = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                        push_code_point(&mut out, cp);
                        i += 2;
                    }
                    _ => i += 1,
                }
            }
            0xdc00..=0xdfff => i += 1,
            _ => {
                push_code_point(&mut out, unit);
                i += 1;
            }
        }
    }
    out
}

fn push_code_point(out: &mut Vec<u8>, cp: u32) {
    match cp {
        0..=0x7f => out.push(cp as u8),
        0x80..=0x7ff => {
            out.push(0xc0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        }
        0x800..=0xffff => {
            out.push(0xe0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        }
        _ => {
            out.push(0xf0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3f) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        }
    }
}

/// Decode UTF-8 bytes into a string.
///
/// Rejects truncated sequences, overlong forms, encoded surrogates and code
/// points above U+10FFFF. The error carries the offset of the offending lead
/// byte.
pub fn utf8_decode(bytes: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let lead = bytes[i];
        let (len, min, init) = match lead {
            0x00..=0x7f => {
                out.push(lead as char);
                i += 1;
                continue;
            }
            0xc2..=0xdf => (2, 0x80, (lead & 0x1f) as u32),
            0xe0..=0xef => (3, 0x800, (lead & 0x0f) as u32),
            0xf0..=0xf4 => (4, 0x10000, (lead & 0x07) as u32),
            _ => return Err(CodecError::InvalidUtf8(i)),
        };

        let continuation = bytes.get(i + 1..i + len).ok_or(CodecError::InvalidUtf8(i))?;
        let mut cp = init;
        for &b in continuation {
            if b & 0xc0 != 0x80 {
                return Err(CodecError::InvalidUtf8(i));
            }
            cp = (cp << 6) | (b & 0x3f) as u32;
        }

        if cp < min {
            return Err(CodecError::InvalidUtf8(i));
        }
        let ch = char::from_u32(cp).ok_or(CodecError::InvalidUtf8(i))?;
        out.push(ch);
        i += len;
    }

    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hex
// ─────────────────────────────────────────────────────────────────────────────

/// Encode bytes as lowercase hex, optionally separating bytes with a space.
pub fn hex_encode(bytes: &[u8], spaced: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, &b) in bytes.iter().enumerate() {
        if spaced && i > 0 {
            out.push(' ');
        }
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode a hex string, upper or lower case.
///
/// Single spaces between byte pairs are accepted, matching the spaced output
/// of [`hex_encode`].
pub fn hex_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len() / 2);
    let mut high: Option<u8> = None;
    let mut digits = 0usize;

    for (position, character) in encoded.char_indices() {
        if character == ' ' && high.is_none() {
            continue;
        }
        let nibble = hex_value(character)
            .ok_or(CodecError::InvalidHexCharacter { character, position })?;
        digits += 1;
        match high.take() {
            Some(h) => out.push((h << 4) | nibble),
            None => high = Some(nibble),
        }
    }

    if high.is_some() {
        return Err(CodecError::OddLength(digits));
    }
    Ok(out)
}

fn hex_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base64
// ─────────────────────────────────────────────────────────────────────────────

/// Encode bytes as standard Base64 (RFC 4648) with `=` padding.
pub fn base64_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let n = (b0 << 16) | (b1 << 8) | b2;

        out.push(BASE64_ALPHABET[(n >> 18) as usize & 0x3f] as char);
        out.push(BASE64_ALPHABET[(n >> 12) as usize & 0x3f] as char);
        out.push(if chunk.len() > 1 {
            BASE64_ALPHABET[(n >> 6) as usize & 0x3f] as char
        } else {
            BASE64_PAD as char
        });
        out.push(if chunk.len() > 2 {
            BASE64_ALPHABET[n as usize & 0x3f] as char
        } else {
            BASE64_PAD as char
        });
    }
    out
}

/// Decode standard Base64 (RFC 4648) with `=` padding.
///
/// The input length must be a multiple of four, padding may only appear at
/// the end, and the unused trailing bits must be zero. Every string this
/// accepts is the exact output of [`base64_encode`] for the returned bytes.
pub fn base64_decode(encoded: &str) -> Result<Vec<u8>> {
    let input = encoded.as_bytes();
    if input.len() % 4 != 0 {
        return Err(CodecError::InvalidBase64Length(input.len()));
    }

    let padding = input.iter().rev().take_while(|&&b| b == BASE64_PAD).count();
    if padding > 2 {
        return Err(CodecError::InvalidPadding);
    }
    let data = &input[..input.len() - padding];

    let mut out = Vec::with_capacity(data.len() * 3 / 4);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for (position, &b) in data.iter().enumerate() {
        let value = BASE64_DECODE[b as usize];
        if value == INVALID {
            if b == BASE64_PAD {
                return Err(CodecError::InvalidPadding);
            }
            let character = encoded[position..].chars().next().unwrap_or('\u{fffd}');
            return Err(CodecError::InvalidBase64Character { character, position });
        }
        acc = (acc << 6) | value as u32;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    if acc != 0 {
        return Err(CodecError::InvalidPadding);
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary
// ─────────────────────────────────────────────────────────────────────────────

/// Encode bytes as 8 MSB-first binary digits each, optionally space separated.
pub fn binary_encode(bytes: &[u8], spaced: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 9);
    for (i, &b) in bytes.iter().enumerate() {
        if spaced && i > 0 {
            out.push(' ');
        }
        for shift in (0..8).rev() {
            out.push(if (b >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }
    out
}

/// Decode a binary digit string, packed or with spaces between bytes.
pub fn binary_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len() / 8);
    let mut current: u8 = 0;
    let mut pending = 0usize;
    let mut total = 0usize;

    for (position, character) in encoded.char_indices() {
        if character == ' ' && pending == 0 {
            continue;
        }
        let bit = match character {
            '0' => 0,
            '1' => 1,
            _ => return Err(CodecError::InvalidBinaryCharacter { character, position }),
        };
        current = (current << 1) | bit;
        pending += 1;
        total += 1;
        if pending == 8 {
            out.push(current);
            current = 0;
            pending = 0;
        }
    }

    if pending != 0 {
        return Err(CodecError::InvalidBinaryLength(total));
    }
    Ok(out)
}
