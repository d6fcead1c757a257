//! HMAC (RFC 2104) over any 64-byte-block hash.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::constant_time_eq;
use crate::digest::{BlockHash, BLOCK_LEN};
use crate::sha256::{Sha256, SHA256_LEN};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// The block-sized working key, derived once per MAC computation.
#[derive(Zeroize, ZeroizeOnDrop)]
struct HmacKey {
    block: [u8; BLOCK_LEN],
}

impl HmacKey {
    /// Hash keys longer than a block; zero-pad shorter ones.
    fn derive<H: BlockHash>(key: &[u8]) -> Self {
        debug_assert_eq!(H::BLOCK_LEN, BLOCK_LEN);

        let mut block = [0u8; BLOCK_LEN];
        if key.len() > H::BLOCK_LEN {
            let digest = H::digest(key);
            let digest = digest.as_ref();
            block[..digest.len()].copy_from_slice(digest);
        } else {
            block[..key.len()].copy_from_slice(key);
        }
        Self { block }
    }

    fn padded(&self, pad: u8) -> [u8; BLOCK_LEN] {
        let mut out = self.block;
        for b in out.iter_mut() {
            *b ^= pad;
        }
        out
    }
}

/// Compute `H(opad || H(ipad || message))`.
pub fn hmac<H: BlockHash>(key: &[u8], message: &[u8]) -> H::Output {
    let key = HmacKey::derive::<H>(key);

    let mut inner_pad = key.padded(IPAD);
    let mut inner = H::new();
    inner.update(&inner_pad);
    inner.update(message);
    inner_pad.zeroize();
    let inner_digest = inner.finalize();

    let mut outer_pad = key.padded(OPAD);
    let mut outer = H::new();
    outer.update(&outer_pad);
    outer.update(inner_digest.as_ref());
    outer_pad.zeroize();
    outer.finalize()
}

/// HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; SHA256_LEN] {
    hmac::<Sha256>(key, message)
}

/// Check an HMAC-SHA256 tag in constant time.
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    constant_time_eq(&hmac_sha256(key, message), tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{hex_decode, hex_encode};
    use crate::md5::Md5;
    use crate::sha1::Sha1;

    fn check(key: &[u8], data: &[u8], expected: &str) {
        assert_eq!(hex_encode(&hmac_sha256(key, data), false), expected);
    }

    #[test]
    fn test_rfc4231_case_1() {
        check(
            &[0x0b; 20],
            b"Hi There",
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
        );
    }

    #[test]
    fn test_rfc4231_case_2() {
        check(
            b"Jefe",
            b"what do ya want for nothing?",
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
        );
    }

    #[test]
    fn test_rfc4231_case_3() {
        check(
            &[0xaa; 20],
            &[0xdd; 50],
            "773ea91e36800e46854db8ebd09181a72959098b3ef8c122d9635514ced565fe",
        );
    }

    #[test]
    fn test_rfc4231_case_4() {
        let key = hex_decode("0102030405060708090a0b0c0d0e0f10111213141516171819").unwrap();
        check(
            &key,
            &[0xcd; 50],
            "82558a389a443c0ea4cc819899f2083a85f0faa3e578f8077a2e3ff46729665b",
        );
    }

    #[test]
    fn test_rfc4231_case_6_long_key() {
        check(
            &[0xaa; 131],
            b"Test Using Larger Than Block-Size Key - Hash Key First",
            "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
        );
    }

    #[test]
    fn test_rfc4231_case_7_long_key_and_data() {
        check(
            &[0xaa; 131],
            b"This is a test using a larger than block-size key and a larger than block-size data. The key needs to be hashed before being used by the HMAC algorithm.",
            "9b09ffa71b942fcb27635fbcd5b0e944bfdc63644f0713938a7f51535c3a35e2",
        );
    }

    #[test]
    fn test_quick_brown_fox() {
        let data = b"The quick brown fox jumps over the lazy dog";
        check(
            b"key",
            data,
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8",
        );
        assert_eq!(
            hex_encode(&hmac::<Sha1>(b"key", data), false),
            "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9"
        );
        assert_eq!(
            hex_encode(&hmac::<Md5>(b"key", data), false),
            "80070713463e7749b90c2dc24911e275"
        );
    }

    #[test]
    fn test_empty_key_and_message() {
        check(
            b"",
            b"",
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad",
        );
    }

    #[test]
    fn test_exact_block_key_is_not_hashed() {
        // A 64-byte key is used as-is; hashing it first would change the tag.
        let key = [0x42u8; 64];
        let hashed = crate::sha256::sha256(&key);
        assert_ne!(hmac_sha256(&key, b"msg"), hmac_sha256(&hashed, b"msg"));

        // A 65-byte key is replaced by its digest.
        let long_key = [0x42u8; 65];
        let long_hashed = crate::sha256::sha256(&long_key);
        assert_eq!(hmac_sha256(&long_key, b"msg"), hmac_sha256(&long_hashed, b"msg"));
    }

    #[test]
    fn test_verify_hmac_sha256() {
        let tag = hmac_sha256(b"secret", b"payload");
        assert!(verify_hmac_sha256(b"secret", b"payload", &tag));

        let mut tampered = tag;
        tampered[31] ^= 0x01;
        assert!(!verify_hmac_sha256(b"secret", b"payload", &tampered));
        assert!(!verify_hmac_sha256(b"other", b"payload", &tag));
    }
}
