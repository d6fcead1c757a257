//! # Signet Testkit
//!
//! Testing utilities for Signet.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: published digest, HMAC and name-based UUID outputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: deterministic toolkits on a fixed clock and seeded entropy
//!
//! ## Golden Vectors
//!
//! ```rust
//! use signet_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, got) in verify_all_vectors() {
//!     assert!(ok, "{} produced {}", name, got);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use signet_testkit::generators::{token_from_params, TokenParams};
//!
//! proptest! {
//!     #[test]
//!     fn signing_is_deterministic(params: TokenParams) {
//!         prop_assert_eq!(token_from_params(&params), token_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use signet_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let token = fixture.session_token("user-1");
//! assert!(fixture.toolkit.verify(&token, Default::default()).is_valid());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_tenant_fixtures, TestFixture};
pub use generators::{token_from_params, TokenParams};
pub use vectors::{
    all_digest_vectors, all_hmac_vectors, all_uuid_vectors, verify_all_vectors, DigestVector,
    HmacVector, UuidVector,
};
