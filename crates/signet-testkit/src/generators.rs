//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use signet::{
    Audience, FixedClock, SignOptions, Signet, TokenDuration, Uuid, UuidOptions, UuidVersion,
};

/// Generate a non-empty secret.
pub fn secret() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=128)
}

/// Generate a Unix time in milliseconds between 1970 and 2100.
pub fn timestamp_ms() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800_000
}

/// Generate a claim name that does not collide with a registered claim.
pub fn claim_name() -> impl Strategy<Value = String> {
    "x_[a-z0-9]{1,12}".prop_map(String::from)
}

/// Generate a JSON scalar.
pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,32}".prop_map(Value::from),
    ]
}

/// Generate a flat payload object.
pub fn payload() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(claim_name(), scalar(), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Generate a token lifetime between one second and one year.
pub fn lifetime() -> impl Strategy<Value = TokenDuration> {
    (1i64..=31_557_600).prop_map(TokenDuration::from_secs)
}

/// Generate an audience, single or multiple.
pub fn audience() -> impl Strategy<Value = Audience> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Audience::from),
        prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(Audience::from),
    ]
}

/// Generate any supported UUID version.
pub fn uuid_version() -> impl Strategy<Value = UuidVersion> {
    prop_oneof![
        Just(UuidVersion::V1),
        Just(UuidVersion::V3),
        Just(UuidVersion::V4),
        Just(UuidVersion::V5),
        Just(UuidVersion::V6),
        Just(UuidVersion::V7),
        Just(UuidVersion::V8),
    ]
}

/// Generate UUID options that always succeed: name-based versions get a
/// namespace and a name.
pub fn uuid_options() -> impl Strategy<Value = UuidOptions> {
    (uuid_version(), any::<[u8; 16]>(), "[ -~]{0,24}", any::<bool>()).prop_map(
        |(version, namespace, name, uppercase)| {
            let options = UuidOptions::new(version).uppercase(uppercase);
            if version.is_name_based() {
                options.namespace(Uuid::from_bytes(namespace)).name(name)
            } else {
                options
            }
        },
    )
}

/// Parameters for signing a token.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub secret: Vec<u8>,
    pub now_ms: i64,
    pub payload: Map<String, Value>,
    pub expires_in: Option<TokenDuration>,
    pub audience: Option<Audience>,
    pub issuer: Option<String>,
    pub subject: Option<String>,
}

impl TokenParams {
    pub fn sign_options(&self) -> SignOptions {
        SignOptions {
            expires_in: self.expires_in,
            not_before: None,
            audience: self.audience.clone(),
            issuer: self.issuer.clone(),
            subject: self.subject.clone(),
        }
    }

    pub fn signer(&self) -> Signet<FixedClock> {
        Signet::with_clock(self.secret.clone(), FixedClock::new(self.now_ms))
            .expect("generated secrets are non-empty")
    }
}

impl Arbitrary for TokenParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            secret(),
            timestamp_ms(),
            payload(),
            prop::option::of(lifetime()),
            prop::option::of(audience()),
            prop::option::of("[a-z.]{1,16}"),
            prop::option::of("[a-z0-9-]{1,16}"),
        )
            .prop_map(
                |(secret, now_ms, payload, expires_in, audience, issuer, subject)| TokenParams {
                    secret,
                    now_ms,
                    payload,
                    expires_in,
                    audience,
                    issuer,
                    subject,
                },
            )
            .boxed()
    }
}

/// Sign a token from parameters.
pub fn token_from_params(params: &TokenParams) -> String {
    params
        .signer()
        .sign(&params.payload, &params.sign_options())
        .expect("generated payloads are objects")
}
