//! # Signet UUID
//!
//! RFC 4122 / RFC 9562 UUIDs: generation of versions 1, 3, 4, 5, 6, 7 and 8,
//! parsing of the canonical text form, and decoding of the embedded fields.
//!
//! ```text
//! xxxxxxxx-xxxx-Vxxx-Nxxx-xxxxxxxxxxxx
//!               ^    ^
//!               |    variant (10xx for RFC 4122)
//!               version nibble
//! ```
//!
//! Bit fields are addressed through the constants in [`layout`] over a
//! `[u8; 16]`, never by slicing text.

pub mod decode;
pub mod error;
pub mod generator;
pub mod layout;
pub mod uuid;
pub mod version;

pub use decode::{decode, decode_bytes, is_valid, DecodedUuid};
pub use error::UuidError;
pub use generator::{v3, v5, UuidGenerator, UuidOptions, V8Custom};
pub use uuid::{is_canonical_shape, Uuid, Variant};
pub use version::UuidVersion;
