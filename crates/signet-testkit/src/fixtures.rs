//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Every fixture runs on a
//! [`FixedClock`] and [`SeededEntropy`], so its tokens and UUIDs are
//! reproducible.

use serde_json::json;

use signet::{
    FixedClock, SeededEntropy, SignOptions, TokenDuration, Toolkit, ToolkitConfig, VerifyOptions,
};

/// 2023-11-14T22:13:20Z
pub const FIXTURE_EPOCH_MS: i64 = 1_700_000_000_000;

/// A toolkit on a controllable clock.
pub struct TestFixture {
    pub secret: Vec<u8>,
    pub toolkit: Toolkit<FixedClock, SeededEntropy>,
}

impl TestFixture {
    /// Create a fixture with the default secret and a one-hour token lifetime.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a fixture whose secret and entropy derive from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let config = ToolkitConfig {
            default_expires_in: Some(TokenDuration::from_secs(3600)),
            default_issuer: Some("signet-testkit".to_string()),
            ..ToolkitConfig::default()
        };
        Self::with_config(seed, config)
    }

    pub fn with_config(seed: u64, config: ToolkitConfig) -> Self {
        let secret = format!("fixture-secret-{}", seed).into_bytes();
        let toolkit = Toolkit::with_sources(
            secret.clone(),
            config,
            FixedClock::new(FIXTURE_EPOCH_MS),
            SeededEntropy::new(seed),
        )
        .expect("fixture secrets are non-empty");
        Self { secret, toolkit }
    }

    pub fn clock(&self) -> &FixedClock {
        self.toolkit.clock()
    }

    /// Move the clock forward.
    pub fn advance(&self, millis: i64) {
        self.clock().advance(millis);
    }

    /// Sign a token for `subject` with the fixture defaults.
    pub fn session_token(&self, subject: &str) -> String {
        self.toolkit
            .sign(&json!({}), SignOptions::new().subject(subject))
            .expect("empty object payloads always sign")
    }

    /// True if `token` verifies for `subject` right now.
    pub fn accepts(&self, token: &str, subject: &str) -> bool {
        self.toolkit
            .verify(token, VerifyOptions::new().subject(subject))
            .is_valid()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures with distinct secrets, one per tenant.
pub fn multi_tenant_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count as u64).map(TestFixture::with_seed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet::VerificationFailure;

    #[test]
    fn test_fixture_session_token() {
        let fixture = TestFixture::new();
        let token = fixture.session_token("user-1");
        assert!(fixture.accepts(&token, "user-1"));
        assert!(!fixture.accepts(&token, "user-2"));
    }

    #[test]
    fn test_fixture_is_reproducible() {
        let a = TestFixture::with_seed(5);
        let b = TestFixture::with_seed(5);
        assert_eq!(a.session_token("u"), b.session_token("u"));
        assert_eq!(a.toolkit.uuids().v4(), b.toolkit.uuids().v4());
    }

    #[test]
    fn test_fixture_token_expires() {
        let fixture = TestFixture::new();
        let token = fixture.session_token("user-1");
        fixture.advance(3_600_000);
        assert!(fixture.accepts(&token, "user-1"));
        fixture.advance(1);
        assert_eq!(
            fixture.toolkit.verify(&token, VerifyOptions::new()).failure(),
            Some(&VerificationFailure::Expired {
                exp: FIXTURE_EPOCH_MS / 1000 + 3600
            })
        );
    }

    #[test]
    fn test_tenants_do_not_share_secrets() {
        let tenants = multi_tenant_fixtures(3);
        let token = tenants[0].session_token("user-1");
        assert!(tenants[0].accepts(&token, "user-1"));
        for other in &tenants[1..] {
            assert_eq!(
                other.toolkit.verify(&token, VerifyOptions::new()).failure(),
                Some(&VerificationFailure::InvalidSignature)
            );
        }
    }
}
