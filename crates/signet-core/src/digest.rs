//! Shared plumbing for the 64-byte-block hash functions.
//!
//! SHA-256, SHA-1 and MD5 all follow the Merkle–Damgård construction over
//! 512-bit blocks. Input is buffered into blocks, then padded with a single
//! `0x80` byte, zeros, and the 64-bit message length in bits. The only
//! difference in padding is the byte order of that length field.

/// Block size shared by every hash in this crate, in bytes.
pub const BLOCK_LEN: usize = 64;

/// Offset of the 64-bit length field in the final padded block.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// A hash function processing 64-byte blocks.
///
/// HMAC is generic over this trait. Implementations are incremental:
/// `update` may be called any number of times before `finalize`.
pub trait BlockHash: Sized {
    /// Input block size in bytes.
    const BLOCK_LEN: usize;

    /// Digest size in bytes.
    const OUTPUT_LEN: usize;

    /// Digest type, a fixed-size byte array.
    type Output: AsRef<[u8]> + Copy;

    /// Create a hasher in its initial state.
    fn new() -> Self;

    /// Absorb more input.
    fn update(&mut self, data: &[u8]);

    /// Pad the message and emit the digest.
    fn finalize(self) -> Self::Output;

    /// One-shot digest of `data`.
    fn digest(data: &[u8]) -> Self::Output {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Byte order of the trailing bit-length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthOrder {
    BigEndian,
    LittleEndian,
}

/// Buffers input into whole blocks and applies the final padding.
#[derive(Clone)]
pub(crate) struct BlockBuffer {
    buffer: [u8; BLOCK_LEN],
    filled: usize,
    total_len: u64,
}

impl BlockBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            buffer: [0u8; BLOCK_LEN],
            filled: 0,
            total_len: 0,
        }
    }

    /// Feed `data`, calling `compress` once per complete block.
    pub(crate) fn update(&mut self, mut data: &[u8], mut compress: impl FnMut(&[u8])) {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        if self.filled > 0 {
            let take = (BLOCK_LEN - self.filled).min(data.len());
            self.buffer[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
            if self.filled < BLOCK_LEN {
                return;
            }
            compress(&self.buffer[..]);
            self.filled = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.filled = rest.len();
    }

    /// Append padding and the bit length, compressing the final block(s).
    ///
    /// When fewer than 9 bytes remain in the current block the length cannot
    /// fit, so an extra all-padding block is emitted.
    pub(crate) fn finish(&mut self, order: LengthOrder, mut compress: impl FnMut(&[u8])) {
        let bit_len = self.total_len.wrapping_mul(8);

        self.buffer[self.filled] = 0x80;
        self.filled += 1;

        if self.filled > LENGTH_OFFSET {
            self.buffer[self.filled..].fill(0);
            compress(&self.buffer[..]);
            self.filled = 0;
        }

        self.buffer[self.filled..LENGTH_OFFSET].fill(0);
        let length = match order {
            LengthOrder::BigEndian => bit_len.to_be_bytes(),
            LengthOrder::LittleEndian => bit_len.to_le_bytes(),
        };
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&length);
        compress(&self.buffer[..]);
        self.filled = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_blocks(len: usize) -> usize {
        let mut buffer = BlockBuffer::new();
        let mut blocks = 0;
        buffer.update(&vec![0x61; len], |_| blocks += 1);
        buffer.finish(LengthOrder::BigEndian, |_| blocks += 1);
        blocks
    }

    #[test]
    fn test_padding_block_counts() {
        assert_eq!(count_blocks(0), 1);
        assert_eq!(count_blocks(55), 1);
        // 0x80 no longer leaves room for the length field
        assert_eq!(count_blocks(56), 2);
        assert_eq!(count_blocks(63), 2);
        // exact multiple forces an all-padding block
        assert_eq!(count_blocks(64), 2);
        assert_eq!(count_blocks(65), 2);
        assert_eq!(count_blocks(128), 3);
    }

    #[test]
    fn test_split_updates_match_single_update() {
        let data: Vec<u8> = (0..200u32).map(|i| i as u8).collect();

        let mut whole = Vec::new();
        let mut buffer = BlockBuffer::new();
        buffer.update(&data, |b| whole.extend_from_slice(b));
        buffer.finish(LengthOrder::LittleEndian, |b| whole.extend_from_slice(b));

        let mut pieces = Vec::new();
        let mut buffer = BlockBuffer::new();
        for chunk in data.chunks(7) {
            buffer.update(chunk, |b| pieces.extend_from_slice(b));
        }
        buffer.finish(LengthOrder::LittleEndian, |b| pieces.extend_from_slice(b));

        assert_eq!(whole, pieces);
        assert_eq!(whole.len() % BLOCK_LEN, 0);
        // bit length 1600 in little-endian at the tail
        assert_eq!(&whole[whole.len() - 8..], &1600u64.to_le_bytes());
    }
}
