//! Decoding UUID text back into its fields.

use serde::Serialize;

use crate::layout::{
    read_clock_seq, read_node, read_unix_ms, read_v1_time, read_v6_time, ticks_to_unix_ms,
};
use crate::uuid::{is_canonical_shape, Uuid, Variant};

/// The fields recovered from a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedUuid {
    pub uuid: Uuid,
    /// Raw version nibble. Not necessarily one this crate generates.
    pub version: u8,
    #[serde(serialize_with = "serialize_variant")]
    pub variant: Variant,
    /// Unix milliseconds, for RFC 4122 variant v1, v6, v7 and v8.
    pub timestamp_ms: Option<i64>,
    /// 14-bit clock sequence, for v1 and v6.
    pub clock_sequence: Option<u16>,
    /// Node identifier, for v1 and v6.
    pub node: Option<[u8; 6]>,
}

impl DecodedUuid {
    pub fn bytes(&self) -> &[u8; 16] {
        self.uuid.as_bytes()
    }

    pub fn is_rfc4122(&self) -> bool {
        self.variant == Variant::Rfc4122
    }
}

fn serialize_variant<S: serde::Serializer>(
    variant: &Variant,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(variant.as_str())
}

/// Decode UUID text. Returns `None` if the text is not UUID-shaped.
///
/// Field extraction depends on the variant: fields are only interpreted
/// for the RFC 4122 layout, so an NCS or Microsoft UUID reports its version
/// nibble and nothing more.
pub fn decode(text: &str) -> Option<DecodedUuid> {
    if !is_canonical_shape(text) {
        return None;
    }
    let uuid = Uuid::parse(text).ok()?;
    Some(decode_bytes(uuid))
}

/// Decode an already-parsed UUID.
pub fn decode_bytes(uuid: Uuid) -> DecodedUuid {
    let bytes = uuid.as_bytes();
    let version = uuid.version_nibble();
    let variant = uuid.variant();

    let mut decoded = DecodedUuid {
        uuid,
        version,
        variant,
        timestamp_ms: None,
        clock_sequence: None,
        node: None,
    };
    if variant != Variant::Rfc4122 {
        return decoded;
    }

    match version {
        1 | 6 => {
            let ticks = if version == 1 {
                read_v1_time(bytes)
            } else {
                read_v6_time(bytes)
            };
            decoded.timestamp_ms = Some(ticks_to_unix_ms(ticks));
            decoded.clock_sequence = Some(read_clock_seq(bytes));
            decoded.node = Some(read_node(bytes));
        }
        7 | 8 => {
            decoded.timestamp_ms = Some(read_unix_ms(bytes));
        }
        _ => {}
    }
    decoded
}

/// True if `text` has the 8-4-4-4-12 hex shape.
pub fn is_valid(text: &str) -> bool {
    is_canonical_shape(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{UuidGenerator, UuidOptions};
    use crate::version::UuidVersion;
    use signet_core::{FixedClock, SeededEntropy};

    const T: i64 = 1_645_557_742_000;

    #[test]
    fn test_decode_rfc9562_v1_example() {
        let decoded = decode("C232AB00-9414-11EC-B3C8-9F6BDECED846").unwrap();
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.variant, Variant::Rfc4122);
        assert_eq!(decoded.timestamp_ms, Some(T));
        assert_eq!(decoded.clock_sequence, Some(0x33c8));
        assert_eq!(decoded.node, Some([0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46]));
    }

    #[test]
    fn test_decode_rfc9562_v6_example() {
        let decoded = decode("1EC9414C-232A-6B00-B3C8-9F6BDECED846").unwrap();
        assert_eq!(decoded.version, 6);
        assert_eq!(decoded.timestamp_ms, Some(T));
        assert_eq!(decoded.clock_sequence, Some(0x33c8));
    }

    #[test]
    fn test_decode_rfc9562_v7_example() {
        let decoded = decode("017F22E2-79B0-7CC3-98C4-DC0C0C07398F").unwrap();
        assert_eq!(decoded.version, 7);
        assert_eq!(decoded.timestamp_ms, Some(T));
        assert_eq!(decoded.clock_sequence, None);
        assert_eq!(decoded.node, None);
    }

    #[test]
    fn test_name_based_has_no_timestamp() {
        let decoded = decode("886313e1-3b8a-5372-9b90-0c9aee199e5d").unwrap();
        assert_eq!(decoded.version, 5);
        assert_eq!(decoded.timestamp_ms, None);
        assert!(decoded.is_rfc4122());
    }

    #[test]
    fn test_not_a_uuid() {
        assert!(decode("not-a-uuid").is_none());
        assert!(decode("").is_none());
        assert!(decode("c232ab00941411ecb3c89f6bdeced846").is_none());
        assert!(!is_valid("c232ab00-9414-11ec-b3c8-9f6bdeced84z"));
        assert!(is_valid("c232ab00-9414-11ec-b3c8-9f6bdeced846"));
    }

    #[test]
    fn test_other_variants_skip_fields() {
        let ncs = decode("c232ab00-9414-11ec-33c8-9f6bdeced846").unwrap();
        assert_eq!(ncs.variant, Variant::Ncs);
        assert_eq!(ncs.version, 1);
        assert_eq!(ncs.timestamp_ms, None);

        let microsoft = decode("c232ab00-9414-11ec-c3c8-9f6bdeced846").unwrap();
        assert_eq!(microsoft.variant, Variant::Microsoft);

        let future = decode("ffffffff-ffff-ffff-ffff-ffffffffffff").unwrap();
        assert_eq!(future.variant, Variant::Future);
        assert_eq!(future.version, 15);
    }

    #[test]
    fn test_generated_versions_decode() {
        let generator = UuidGenerator::with_sources(FixedClock::new(T + 123), SeededEntropy::new(1));
        for version in [1u8, 4, 6, 7, 8] {
            let version = UuidVersion::try_from(version).unwrap();
            let text = generator.generate(&UuidOptions::new(version)).unwrap();
            let decoded = decode(&text).unwrap();
            assert_eq!(decoded.version, version.number());
            assert_eq!(decoded.variant, Variant::Rfc4122);
            if version.is_time_based() {
                assert_eq!(decoded.timestamp_ms, Some(T + 123));
            }
        }
    }

    #[test]
    fn test_time_based_decode_exactly_at_generation_time() {
        let clock = FixedClock::new(0);
        let generator = UuidGenerator::with_sources(&clock, SeededEntropy::new(99));
        for t in [0, 1, 999, T, T + 1, 4_102_444_800_000] {
            clock.set(t);
            assert_eq!(decode_bytes(generator.v1()).timestamp_ms, Some(t));
            assert_eq!(decode_bytes(generator.v6()).timestamp_ms, Some(t));
            assert_eq!(decode_bytes(generator.v7()).timestamp_ms, Some(t));
        }
    }

    #[test]
    fn test_uppercase_and_lowercase_decode_alike() {
        let lower = decode("017f22e2-79b0-7cc3-98c4-dc0c0c07398f").unwrap();
        let upper = decode("017F22E2-79B0-7CC3-98C4-DC0C0C07398F").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_serializes_variant_as_name() {
        let decoded = decode("886313e1-3b8a-5372-9b90-0c9aee199e5d").unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["variant"], "RFC4122");
        assert_eq!(json["uuid"], "886313e1-3b8a-5372-9b90-0c9aee199e5d");
        assert_eq!(json["version"], 5);
    }
}
