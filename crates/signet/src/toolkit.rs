//! The Toolkit: token and UUID services under one configuration.
//!
//! Both services share one clock, so a token's `iat` and the UUIDs minted
//! alongside it agree on the time.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use signet_core::{Clock, EntropySource, SecretKey, SystemClock, ThreadEntropy};
use signet_token::{
    Audience, DecodedToken, Payload, Segment, SignOptions, Signet, TokenDuration, TokenError,
    Verification, VerifyOptions,
};
use signet_uuid::{decode as decode_uuid_text, DecodedUuid, Uuid, UuidGenerator, UuidOptions};

use crate::error::Result;

/// Token ID claim added by [`Toolkit::issue`].
pub const JTI: &str = "jti";

/// Configuration for the Toolkit.
///
/// Defaults fill only the option fields a caller leaves unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// Lifetime for tokens signed without `expires_in`.
    pub default_expires_in: Option<TokenDuration>,
    /// Issuer written when signing and expected when verifying.
    pub default_issuer: Option<String>,
    /// Audience written when signing and expected when verifying.
    pub default_audience: Option<Audience>,
    /// Emit UUID text in uppercase.
    pub uppercase_uuids: bool,
}

/// A token minted by [`Toolkit::issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    /// The v4 UUID stored in the `jti` claim.
    pub jti: Uuid,
}

/// Signs and verifies tokens and generates UUIDs.
#[derive(Debug)]
pub struct Toolkit<C: Clock = SystemClock, E: EntropySource = ThreadEntropy> {
    signet: Signet<Arc<C>>,
    uuids: UuidGenerator<Arc<C>, E>,
    config: ToolkitConfig,
}

impl Toolkit {
    /// A toolkit on the system clock and thread-local CSPRNG.
    pub fn new(secret: impl Into<SecretKey>, config: ToolkitConfig) -> Result<Self> {
        Self::with_sources(secret, config, SystemClock, ThreadEntropy)
    }
}

impl<C: Clock, E: EntropySource> Toolkit<C, E> {
    /// Create a toolkit with explicit time and randomness sources.
    pub fn with_sources(
        secret: impl Into<SecretKey>,
        config: ToolkitConfig,
        clock: C,
        entropy: E,
    ) -> Result<Self> {
        let clock = Arc::new(clock);
        Ok(Self {
            signet: Signet::with_clock(secret, Arc::clone(&clock))?,
            uuids: UuidGenerator::with_sources(clock, entropy),
            config,
        })
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        self.signet.clock()
    }

    pub fn signet(&self) -> &Signet<Arc<C>> {
        &self.signet
    }

    pub fn uuids(&self) -> &UuidGenerator<Arc<C>, E> {
        &self.uuids
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tokens
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign a payload, filling unset options from the config.
    pub fn sign<P: Serialize + ?Sized>(&self, payload: &P, options: SignOptions) -> Result<String> {
        let options = self.sign_defaults(options);
        Ok(self.signet.sign(payload, &options)?)
    }

    /// Sign a payload with a fresh v4 UUID in its `jti` claim.
    pub fn issue<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        options: SignOptions,
    ) -> Result<IssuedToken> {
        let mut fields = match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(TokenError::PayloadNotObject.into()),
            Err(e) => {
                return Err(TokenError::InvalidJson {
                    segment: Segment::Payload,
                    message: e.to_string(),
                }
                .into())
            }
        };

        let jti = self.uuids.v4();
        fields.insert(JTI.to_string(), Value::String(jti.to_string()));
        let token = self.sign(&fields, options)?;
        tracing::debug!("issued token {}", jti);
        Ok(IssuedToken { token, jti })
    }

    /// Verify a token, expecting the configured issuer and audience unless
    /// `options` names its own.
    pub fn verify(&self, token: &str, options: VerifyOptions) -> Verification {
        let options = self.verify_defaults(options);
        self.signet.verify(token, &options)
    }

    pub fn verify_or_throw(&self, token: &str, options: VerifyOptions) -> Result<Payload> {
        let options = self.verify_defaults(options);
        Ok(self.signet.verify_or_throw(token, &options)?)
    }

    /// Parse a token without checking its signature.
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        Ok(self.signet.decode(token)?)
    }

    fn sign_defaults(&self, mut options: SignOptions) -> SignOptions {
        if options.expires_in.is_none() {
            options.expires_in = self.config.default_expires_in;
        }
        if options.issuer.is_none() {
            options.issuer = self.config.default_issuer.clone();
        }
        if options.audience.is_none() {
            options.audience = self.config.default_audience.clone();
        }
        options
    }

    fn verify_defaults(&self, mut options: VerifyOptions) -> VerifyOptions {
        if options.issuer.is_none() {
            options.issuer = self.config.default_issuer.clone();
        }
        if options.audience.is_none() {
            options.audience = self.config.default_audience.clone();
        }
        options
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UUIDs
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate UUID text. `uppercase_uuids` in the config forces uppercase.
    pub fn uuid(&self, options: &UuidOptions) -> Result<String> {
        if self.config.uppercase_uuids && !options.uppercase {
            let options = options.clone().uppercase(true);
            return Ok(self.uuids.generate(&options)?);
        }
        Ok(self.uuids.generate(options)?)
    }

    /// Decode UUID text. `None` means the text is not a UUID.
    pub fn decode_uuid(&self, text: &str) -> Option<DecodedUuid> {
        decode_uuid_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignetError;
    use serde_json::json;
    use signet_core::{FixedClock, SeededEntropy};
    use signet_token::VerificationFailure;
    use signet_uuid::{UuidError, UuidVersion};

    const NOW: i64 = 1_700_000_000_000;

    fn toolkit(config: ToolkitConfig) -> Toolkit<FixedClock, SeededEntropy> {
        let clock = FixedClock::new(NOW);
        Toolkit::with_sources("toolkit-secret", config, clock, SeededEntropy::new(3)).unwrap()
    }

    #[test]
    fn test_empty_secret() {
        let err = Toolkit::new("", ToolkitConfig::default()).unwrap_err();
        assert_eq!(err, SignetError::Token(TokenError::EmptySecret));
    }

    #[test]
    fn test_config_defaults_fill_unset_options() {
        let kit = toolkit(ToolkitConfig {
            default_expires_in: Some(TokenDuration::from_secs(60)),
            default_issuer: Some("svc".to_string()),
            default_audience: Some(Audience::from("api")),
            ..ToolkitConfig::default()
        });

        let token = kit.sign(&json!({}), SignOptions::new()).unwrap();
        let payload = kit.decode(&token).unwrap().payload;
        assert_eq!(payload["exp"], 1_700_000_060);
        assert_eq!(payload["iss"], "svc");
        assert_eq!(payload["aud"], "api");

        let explicit = kit
            .sign(&json!({}), SignOptions::new().issuer("other").expires_in(120i64))
            .unwrap();
        let payload = kit.decode(&explicit).unwrap().payload;
        assert_eq!(payload["exp"], 1_700_000_120);
        assert_eq!(payload["iss"], "other");

        // Configured issuer is expected by default.
        assert!(kit.verify(&token, VerifyOptions::new()).is_valid());
        assert_eq!(
            kit.verify(&explicit, VerifyOptions::new()).failure(),
            Some(&VerificationFailure::InvalidIssuer)
        );
        assert!(kit
            .verify(&explicit, VerifyOptions::new().issuer("other"))
            .is_valid());
    }

    #[test]
    fn test_default_config_adds_nothing() {
        let kit = toolkit(ToolkitConfig::default());
        let token = kit.sign(&json!({"k": 1}), SignOptions::new()).unwrap();
        let payload = kit.decode(&token).unwrap().payload;
        assert!(!payload.contains_key("exp"));
        assert!(!payload.contains_key("iss"));
        assert!(!payload.contains_key("aud"));
    }

    #[test]
    fn test_issue_adds_fresh_jti() {
        let kit = toolkit(ToolkitConfig::default());
        let first = kit.issue(&json!({"sub": "u1"}), SignOptions::new()).unwrap();
        let second = kit.issue(&json!({"sub": "u1"}), SignOptions::new()).unwrap();
        assert_ne!(first.jti, second.jti);
        assert_eq!(first.jti.version_nibble(), 4);

        let payload = kit.verify_or_throw(&first.token, VerifyOptions::new()).unwrap();
        assert_eq!(payload["jti"], first.jti.to_string());
        assert_eq!(payload["sub"], "u1");
    }

    #[test]
    fn test_issue_rejects_non_object() {
        let kit = toolkit(ToolkitConfig::default());
        assert_eq!(
            kit.issue(&json!("scalar"), SignOptions::new()).unwrap_err(),
            SignetError::Token(TokenError::PayloadNotObject)
        );
    }

    #[test]
    fn test_verify_or_throw_message() {
        let kit = toolkit(ToolkitConfig::default());
        let token = kit.sign(&json!({}), SignOptions::new().subject("u1")).unwrap();
        let err = kit
            .verify_or_throw(&token, VerifyOptions::new().subject("u2"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid token subject!");
        assert_eq!(
            err.verification_failure(),
            Some(&VerificationFailure::InvalidSubject)
        );
    }

    #[test]
    fn test_uuid_uppercase_config() {
        let kit = toolkit(ToolkitConfig {
            uppercase_uuids: true,
            ..ToolkitConfig::default()
        });
        let text = kit
            .uuid(
                &UuidOptions::new(UuidVersion::V5)
                    .namespace(Uuid::NAMESPACE_DNS)
                    .name("python.org"),
            )
            .unwrap();
        assert_eq!(text, "886313E1-3B8A-5372-9B90-0C9AEE199E5D");
    }

    #[test]
    fn test_uuid_shares_clock_with_tokens() {
        let kit = toolkit(ToolkitConfig::default());
        kit.clock().advance(42);
        let text = kit.uuid(&UuidOptions::new(UuidVersion::V7)).unwrap();
        assert_eq!(kit.decode_uuid(&text).unwrap().timestamp_ms, Some(NOW + 42));
    }

    #[test]
    fn test_uuid_errors_convert() {
        let kit = toolkit(ToolkitConfig::default());
        assert_eq!(
            kit.uuid(&UuidOptions::new(UuidVersion::V3).name("x")).unwrap_err(),
            SignetError::Uuid(UuidError::MissingNamespace(3))
        );
        assert!(kit.decode_uuid("nope").is_none());
    }
}
