//! UUID generation for versions 1, 3, 4, 5, 6, 7 and 8.
//!
//! Time and randomness come from the generator's [`Clock`] and
//! [`EntropySource`]. Name-based versions are pure functions and are also
//! available as the free functions [`v3`] and [`v5`].
//!
//! The v1/v6 node is never a hardware address. It is drawn from the entropy
//! source on every call with the multicast bit set, as RFC 4122 section 4.5
//! allows for random nodes.

use signet_core::{BlockHash, Clock, EntropySource, Md5, Sha1, SystemClock, ThreadEntropy};

use crate::error::{Result, UuidError};
use crate::layout::{
    gregorian_ticks, set_rfc4122_variant, set_version, write_clock_seq, write_unix_ms,
    write_v1_time, write_v6_time, MULTICAST_BIT, NODE, TICKS_PER_MS,
};
use crate::uuid::Uuid;
use crate::version::UuidVersion;

const SUB_MS_TICKS: u16 = TICKS_PER_MS as u16;

/// Free-form bytes of a v8 UUID (bytes 6..16, 74 usable bits after the
/// version and variant are written).
pub type V8Custom = [u8; 10];

/// MD5 name-based UUID.
pub fn v3(namespace: &Uuid, name: &[u8]) -> Uuid {
    let mut hasher = Md5::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    finish_name_based(&hasher.finalize(), UuidVersion::V3)
}

/// SHA-1 name-based UUID. The 20-byte digest is truncated to 16.
pub fn v5(namespace: &Uuid, name: &[u8]) -> Uuid {
    let mut hasher = Sha1::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    finish_name_based(&hasher.finalize(), UuidVersion::V5)
}

fn finish_name_based(digest: &[u8], version: UuidVersion) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    set_version(&mut bytes, version.number());
    set_rfc4122_variant(&mut bytes);
    Uuid(bytes)
}

/// Options for [`UuidGenerator::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UuidOptions {
    pub version: UuidVersion,
    /// Namespace UUID text, for v3 and v5.
    pub namespace: Option<String>,
    /// Name, for v3 and v5.
    pub name: Option<String>,
    /// Free-form bytes for v8; random when absent.
    pub custom: Option<V8Custom>,
    pub uppercase: bool,
}

impl UuidOptions {
    pub fn new(version: UuidVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn custom(mut self, custom: V8Custom) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }
}

/// Generates UUIDs from a clock and an entropy source.
#[derive(Debug, Clone)]
pub struct UuidGenerator<C: Clock = SystemClock, E: EntropySource = ThreadEntropy> {
    clock: C,
    entropy: E,
}

impl UuidGenerator {
    /// A generator on the system clock and thread-local CSPRNG.
    pub fn new() -> Self {
        Self::with_sources(SystemClock, ThreadEntropy)
    }
}

impl Default for UuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, E: EntropySource> UuidGenerator<C, E> {
    pub fn with_sources(clock: C, entropy: E) -> Self {
        Self { clock, entropy }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Gregorian time, random clock sequence, random multicast node.
    pub fn v1(&self) -> Uuid {
        let fields = self.time_fields();
        let mut bytes = [0u8; 16];
        write_v1_time(&mut bytes, fields.ticks);
        fields.write_tail(&mut bytes);
        set_version(&mut bytes, UuidVersion::V1.number());
        Uuid(bytes)
    }

    pub fn v3(&self, namespace: &Uuid, name: &str) -> Uuid {
        v3(namespace, name.as_bytes())
    }

    /// 122 random bits.
    pub fn v4(&self) -> Uuid {
        let mut bytes: [u8; 16] = self.entropy.array();
        set_version(&mut bytes, UuidVersion::V4.number());
        set_rfc4122_variant(&mut bytes);
        Uuid(bytes)
    }

    pub fn v5(&self, namespace: &Uuid, name: &str) -> Uuid {
        v5(namespace, name.as_bytes())
    }

    /// Like v1 with the timestamp stored most significant bits first.
    pub fn v6(&self) -> Uuid {
        let fields = self.time_fields();
        let mut bytes = [0u8; 16];
        write_v6_time(&mut bytes, fields.ticks);
        fields.write_tail(&mut bytes);
        set_version(&mut bytes, UuidVersion::V6.number());
        Uuid(bytes)
    }

    /// Unix milliseconds followed by 74 random bits. UUIDs from the same
    /// millisecond are not ordered.
    pub fn v7(&self) -> Uuid {
        let mut bytes: [u8; 16] = self.entropy.array();
        write_unix_ms(&mut bytes, self.clock.now_millis());
        set_version(&mut bytes, UuidVersion::V7.number());
        set_rfc4122_variant(&mut bytes);
        Uuid(bytes)
    }

    /// Unix milliseconds followed by random free-form bits.
    pub fn v8(&self) -> Uuid {
        self.v8_with(self.entropy.array())
    }

    /// Unix milliseconds followed by caller-supplied bits. The version
    /// nibble and variant bits overwrite 6 of the 80 supplied bits.
    pub fn v8_with(&self, custom: V8Custom) -> Uuid {
        let mut bytes = [0u8; 16];
        write_unix_ms(&mut bytes, self.clock.now_millis());
        bytes[6..].copy_from_slice(&custom);
        set_version(&mut bytes, UuidVersion::V8.number());
        set_rfc4122_variant(&mut bytes);
        Uuid(bytes)
    }

    /// Generate a UUID of `version`. Name-based versions are rejected here
    /// since they need inputs; use [`UuidGenerator::generate`].
    pub fn uuid(&self, version: UuidVersion) -> Result<Uuid> {
        match version {
            UuidVersion::V1 => Ok(self.v1()),
            UuidVersion::V3 | UuidVersion::V5 => {
                Err(UuidError::MissingNamespace(version.number()))
            }
            UuidVersion::V4 => Ok(self.v4()),
            UuidVersion::V6 => Ok(self.v6()),
            UuidVersion::V7 => Ok(self.v7()),
            UuidVersion::V8 => Ok(self.v8()),
        }
    }

    /// Generate a UUID as canonical text according to `options`.
    pub fn generate(&self, options: &UuidOptions) -> Result<String> {
        let uuid = match options.version {
            UuidVersion::V3 | UuidVersion::V5 => {
                let (namespace, name) = name_inputs(options)?;
                if options.version == UuidVersion::V3 {
                    v3(&namespace, name.as_bytes())
                } else {
                    v5(&namespace, name.as_bytes())
                }
            }
            UuidVersion::V8 => match options.custom {
                Some(custom) => self.v8_with(custom),
                None => self.v8(),
            },
            version => self.uuid(version)?,
        };
        tracing::trace!("generated {} uuid", options.version);
        Ok(uuid.to_text(options.uppercase))
    }

    fn time_fields(&self) -> TimeFields {
        let now = self.clock.now_millis();
        let random: [u8; 10] = self.entropy.array();

        let sub_ms = u16::from_be_bytes([random[0], random[1]]) % SUB_MS_TICKS;
        let clock_seq = u16::from_be_bytes([random[2], random[3]]);
        let mut node = [0u8; 6];
        node.copy_from_slice(&random[4..]);
        node[0] |= MULTICAST_BIT;

        TimeFields {
            ticks: gregorian_ticks(now, sub_ms),
            clock_seq,
            node,
        }
    }
}

struct TimeFields {
    ticks: u64,
    clock_seq: u16,
    node: [u8; 6],
}

impl TimeFields {
    /// Clock sequence, variant and node: bytes 8..16.
    fn write_tail(&self, bytes: &mut [u8; 16]) {
        write_clock_seq(bytes, self.clock_seq);
        bytes[NODE].copy_from_slice(&self.node);
    }
}

fn name_inputs(options: &UuidOptions) -> Result<(Uuid, &str)> {
    let version = options.version.number();
    let namespace = options
        .namespace
        .as_deref()
        .ok_or(UuidError::MissingNamespace(version))?;
    let namespace =
        Uuid::parse(namespace).map_err(|_| UuidError::InvalidNamespace(namespace.to_string()))?;
    let name = options
        .name
        .as_deref()
        .ok_or(UuidError::MissingName(version))?;
    Ok((namespace, name))
}
