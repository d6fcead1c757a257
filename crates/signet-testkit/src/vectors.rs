//! Golden test vectors for deterministic verification.
//!
//! Digest vectors are from FIPS 180 and RFC 1321, HMAC vectors from
//! RFC 4231, name-based UUIDs from RFC 4122 Appendix B and the output of
//! independent implementations.

use signet_core::{hex_encode, hmac_sha256, md5, sha1, sha256};
use signet_uuid::{v3, v5, Uuid};

/// A message with its expected digests.
#[derive(Debug, Clone)]
pub struct DigestVector {
    pub name: &'static str,
    pub message: &'static [u8],
    pub sha256: &'static str,
    pub sha1: &'static str,
    pub md5: &'static str,
}

/// An HMAC-SHA256 test case.
#[derive(Debug, Clone)]
pub struct HmacVector {
    pub name: &'static str,
    pub key: Vec<u8>,
    pub message: &'static [u8],
    pub expected: &'static str,
}

/// A name-based UUID test case.
#[derive(Debug, Clone)]
pub struct UuidVector {
    pub name: &'static str,
    /// 3 or 5.
    pub version: u8,
    pub namespace: Uuid,
    pub input: &'static str,
    pub expected: &'static str,
}

/// Get all digest vectors.
pub fn all_digest_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            name: "empty",
            message: b"",
            sha256: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            sha1: "da39a3ee5e6b4b0d3255bfef95601890afd80709",
            md5: "d41d8cd98f00b204e9800998ecf8427e",
        },
        DigestVector {
            name: "abc",
            message: b"abc",
            sha256: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            sha1: "a9993e364706816aba3e25717850c26c9cd0d89d",
            md5: "900150983cd24fb0d6963f7d28e17f72",
        },
        // 56 bytes: padding spills into a second block
        DigestVector {
            name: "two blocks",
            message: b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            sha256: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
            sha1: "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            md5: "8215ef0796a20bcaaae116d3876c664a",
        },
        DigestVector {
            name: "quick brown fox",
            message: b"The quick brown fox jumps over the lazy dog",
            sha256: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
            sha1: "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
            md5: "9e107d9d372bb6826bd81d3542a419d6",
        },
    ]
}

/// Get all HMAC-SHA256 vectors.
pub fn all_hmac_vectors() -> Vec<HmacVector> {
    vec![
        HmacVector {
            name: "RFC 4231 case 1",
            key: vec![0x0b; 20],
            message: b"Hi There",
            expected: "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
        },
        HmacVector {
            name: "RFC 4231 case 2",
            key: b"Jefe".to_vec(),
            message: b"what do ya want for nothing?",
            expected: "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
        },
        // Key longer than the block is hashed first
        HmacVector {
            name: "RFC 4231 case 6",
            key: vec![0xaa; 131],
            message: b"Test Using Larger Than Block-Size Key - Hash Key First",
            expected: "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
        },
        HmacVector {
            name: "quick brown fox",
            key: b"key".to_vec(),
            message: b"The quick brown fox jumps over the lazy dog",
            expected: "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8",
        },
    ]
}

/// Get all name-based UUID vectors.
pub fn all_uuid_vectors() -> Vec<UuidVector> {
    vec![
        UuidVector {
            name: "v3 dns",
            version: 3,
            namespace: Uuid::NAMESPACE_DNS,
            input: "www.example.com",
            expected: "5df41881-3aed-3515-88a7-2f4a814cf09e",
        },
        UuidVector {
            name: "v3 url",
            version: 3,
            namespace: Uuid::NAMESPACE_URL,
            input: "https://example.com/x",
            expected: "65832149-b0a6-3d90-af14-b7223c5dc885",
        },
        UuidVector {
            name: "v3 x500",
            version: 3,
            namespace: Uuid::NAMESPACE_X500,
            input: "cn=signet",
            expected: "77e8c386-0d7d-35eb-922f-32bdfd038af6",
        },
        UuidVector {
            name: "v5 dns",
            version: 5,
            namespace: Uuid::NAMESPACE_DNS,
            input: "www.example.com",
            expected: "2ed6657d-e927-568b-95e1-2665a8aea6a2",
        },
        UuidVector {
            name: "v5 url",
            version: 5,
            namespace: Uuid::NAMESPACE_URL,
            input: "https://example.com/x",
            expected: "49517db3-5541-5e91-9cd4-395dd68a97ac",
        },
        UuidVector {
            name: "v5 x500",
            version: 5,
            namespace: Uuid::NAMESPACE_X500,
            input: "cn=signet",
            expected: "9d34ea34-8d34-578a-af5e-3a3d347b34f9",
        },
    ]
}

fn hex(bytes: &[u8]) -> String {
    hex_encode(bytes, false)
}

/// Run every vector through the implementation.
///
/// Returns `(name, matches, actual)` per check.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();

    for v in all_digest_vectors() {
        for (algorithm, actual, expected) in [
            ("sha256", hex(&sha256(v.message)), v.sha256),
            ("sha1", hex(&sha1(v.message)), v.sha1),
            ("md5", hex(&md5(v.message)), v.md5),
        ] {
            let matches = actual == expected;
            results.push((format!("{} {}", algorithm, v.name), matches, actual));
        }
    }

    for v in all_hmac_vectors() {
        let actual = hex(&hmac_sha256(&v.key, v.message));
        let matches = actual == v.expected;
        results.push((v.name.to_string(), matches, actual));
    }

    for v in all_uuid_vectors() {
        let uuid = match v.version {
            3 => v3(&v.namespace, v.input.as_bytes()),
            _ => v5(&v.namespace, v.input.as_bytes()),
        };
        let actual = uuid.to_string();
        let matches = actual == v.expected;
        results.push((v.name.to_string(), matches, actual));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{}' produced {}", name, actual);
        }
    }

    #[test]
    fn test_vectors_match_hex_crate() {
        for v in all_digest_vectors() {
            assert_eq!(hex::encode(sha256(v.message)), v.sha256, "{}", v.name);
        }
    }

    #[test]
    fn test_million_a() {
        let message = vec![b'a'; 1_000_000];
        assert_eq!(
            hex(&sha256(&message)),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn test_uuid_vectors_parse_back() {
        for v in all_uuid_vectors() {
            let parsed: Uuid = v.expected.parse().unwrap();
            assert_eq!(parsed.version_nibble(), v.version, "{}", v.name);
        }
    }
}
