//! Signing, decoding and verification of Signet tokens.
//!
//! A token is `base64(header) "." base64(payload) "." base64(signature)`
//! where header and payload are canonical JSON and the signature is
//! HMAC-SHA256 over the first two segments joined by `"."`.
//!
//! Verification order:
//!
//! 1. exactly three segments
//! 2. signature, compared in constant time; nothing else is read from a
//!    token that fails here
//! 3. header `alg` is `HS256`, payload is a JSON object
//! 4. `exp`, `nbf`, `iss`, `aud`, `sub`, in that order, first failure wins

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use signet_core::{base64_decode, base64_encode, constant_time_eq, Clock, SecretKey, SystemClock};

use crate::canonical::to_canonical_json;
use crate::claims::{
    SignOptions, VerifyOptions, AUD, EXP, EXP_DATE, IAT, IAT_DATE, ISS, NBF, NBF_DATE, SUB,
};
use crate::error::{Result, Segment, TokenError, VerificationFailure};

/// The only supported signing algorithm.
pub const ALGORITHM: &str = "HS256";

/// Token type written into every header.
pub const TOKEN_TYPE: &str = "SIGNET+JWT";

/// A decoded token payload: a JSON object.
pub type Payload = Map<String, Value>;

/// The token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(default)]
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// A token split into its parts. The signature has not been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub header: TokenHeader,
    pub payload: Payload,
    /// Base64 signature segment as carried.
    pub signature: String,
}

/// The outcome of [`Signet::verify`].
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Valid(Payload),
    Invalid(VerificationFailure),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Verification::Valid(payload) => Some(payload),
            Verification::Invalid(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&VerificationFailure> {
        match self {
            Verification::Valid(_) => None,
            Verification::Invalid(failure) => Some(failure),
        }
    }

    /// The failure message, if invalid.
    pub fn error(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }

    pub fn into_result(self) -> std::result::Result<Payload, VerificationFailure> {
        match self {
            Verification::Valid(payload) => Ok(payload),
            Verification::Invalid(failure) => Err(failure),
        }
    }
}

/// Signs and verifies tokens under one secret.
#[derive(Debug)]
pub struct Signet<C: Clock = SystemClock> {
    secret: SecretKey,
    clock: C,
}

impl Signet {
    /// A signer on the system clock. Empty secrets are rejected.
    pub fn new(secret: impl Into<SecretKey>) -> Result<Self> {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> Signet<C> {
    pub fn with_clock(secret: impl Into<SecretKey>, clock: C) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self { secret, clock })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Sign `payload` with the registered claims from `options`.
    ///
    /// Caller fields are applied after the registered claims and replace
    /// any of the same name.
    pub fn sign<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        options: &SignOptions,
    ) -> Result<String> {
        let fields = match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(TokenError::PayloadNotObject),
            Err(e) => {
                return Err(TokenError::InvalidJson {
                    segment: Segment::Payload,
                    message: e.to_string(),
                })
            }
        };

        let now = self.clock.now_millis();
        let mut claims = Map::new();
        insert_time_claim(&mut claims, IAT, IAT_DATE, now.div_euclid(1000));
        if let Some(expires_in) = options.expires_in {
            let exp = offset_secs(now, expires_in.as_millis());
            insert_time_claim(&mut claims, EXP, EXP_DATE, exp);
        }
        if let Some(not_before) = options.not_before {
            let nbf = offset_secs(now, not_before.as_millis());
            insert_time_claim(&mut claims, NBF, NBF_DATE, nbf);
        }
        if let Some(audience) = &options.audience {
            claims.insert(AUD.to_string(), audience.to_value());
        }
        if let Some(subject) = &options.subject {
            claims.insert(SUB.to_string(), Value::String(subject.clone()));
        }
        if let Some(issuer) = &options.issuer {
            claims.insert(ISS.to_string(), Value::String(issuer.clone()));
        }
        claims.extend(fields);

        let header = serde_json::json!({ "alg": ALGORITHM, "typ": TOKEN_TYPE });
        let header_b64 = base64_encode(to_canonical_json(&header).as_bytes());
        let payload_b64 = base64_encode(to_canonical_json(&Value::Object(claims)).as_bytes());

        let signing_input = format!("{}.{}", header_b64, payload_b64);
        let signature_b64 = base64_encode(&self.secret.sign(signing_input.as_bytes()));
        Ok(format!("{}.{}", signing_input, signature_b64))
    }

    /// Split and parse a token without checking its signature.
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        decode(token)
    }

    /// Check the signature and every requested claim.
    pub fn verify(&self, token: &str, options: &VerifyOptions) -> Verification {
        match self.check(token, options) {
            Ok(payload) => Verification::Valid(payload),
            Err(failure) => {
                tracing::debug!("token rejected: {}", failure);
                Verification::Invalid(failure)
            }
        }
    }

    /// [`Signet::verify`] with the failure as an error.
    pub fn verify_or_throw(&self, token: &str, options: &VerifyOptions) -> Result<Payload> {
        self.verify(token, options)
            .into_result()
            .map_err(TokenError::Verification)
    }

    fn check(
        &self,
        token: &str,
        options: &VerifyOptions,
    ) -> std::result::Result<Payload, VerificationFailure> {
        let parts = split(token).map_err(|e| {
            tracing::warn!("malformed token reached verify: {}", e);
            VerificationFailure::Malformed {
                reason: e.to_string(),
            }
        })?;

        let expected = base64_encode(&self.secret.sign(parts.signing_input.as_bytes()));
        if !constant_time_eq(expected.as_bytes(), parts.signature.as_bytes()) {
            return Err(VerificationFailure::InvalidSignature);
        }

        let decoded = parts
            .decode()
            .map_err(|e| VerificationFailure::Malformed {
                reason: e.to_string(),
            })?;
        if decoded.header.alg != ALGORITHM {
            return Err(VerificationFailure::Malformed {
                reason: format!("unsupported algorithm {:?}", decoded.header.alg),
            });
        }

        check_claims(&decoded.payload, options, self.clock.now_millis())?;
        Ok(decoded.payload)
    }
}

/// Split and parse a token without checking its signature.
pub fn decode(token: &str) -> Result<DecodedToken> {
    split(token)?.decode()
}

/// Borrowed views of the three segments.
struct Parts<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
    signing_input: &'a str,
}

impl Parts<'_> {
    fn decode(&self) -> Result<DecodedToken> {
        let header = parse_segment(self.header, Segment::Header)?;
        let header: TokenHeader =
            serde_json::from_value(header).map_err(|e| TokenError::InvalidJson {
                segment: Segment::Header,
                message: e.to_string(),
            })?;
        let payload = match parse_segment(self.payload, Segment::Payload)? {
            Value::Object(payload) => payload,
            _ => return Err(TokenError::PayloadNotObject),
        };
        Ok(DecodedToken {
            header,
            payload,
            signature: self.signature.to_string(),
        })
    }
}

fn split(token: &str) -> Result<Parts<'_>> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments[..] else {
        return Err(TokenError::MalformedToken {
            segments: segments.len(),
        });
    };
    Ok(Parts {
        header,
        payload,
        signature,
        signing_input: &token[..header.len() + 1 + payload.len()],
    })
}

fn parse_segment(segment: &str, which: Segment) -> Result<Value> {
    let bytes = base64_decode(segment).map_err(|source| TokenError::InvalidEncoding {
        segment: which,
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::InvalidJson {
        segment: which,
        message: e.to_string(),
    })
}

fn check_claims(
    payload: &Payload,
    options: &VerifyOptions,
    now_ms: i64,
) -> std::result::Result<(), VerificationFailure> {
    if let Some(exp) = numeric_claim(payload, EXP)? {
        if now_ms as f64 > exp * 1000.0 {
            return Err(VerificationFailure::Expired { exp: exp as i64 });
        }
    }
    if let Some(nbf) = numeric_claim(payload, NBF)? {
        if (now_ms as f64) < nbf * 1000.0 {
            return Err(VerificationFailure::NotYetValid { nbf: nbf as i64 });
        }
    }
    if let Some(expected) = &options.issuer {
        if let Some(iss) = payload.get(ISS) {
            if iss.as_str() != Some(expected.as_str()) {
                return Err(VerificationFailure::InvalidIssuer);
            }
        }
    }
    if let Some(expected) = &options.audience {
        if !expected.matches_claim(payload.get(AUD)) {
            return Err(VerificationFailure::InvalidAudience);
        }
    }
    if let Some(expected) = &options.subject {
        if payload.get(SUB).and_then(Value::as_str) != Some(expected.as_str()) {
            return Err(VerificationFailure::InvalidSubject);
        }
    }
    Ok(())
}

fn numeric_claim(
    payload: &Payload,
    name: &str,
) -> std::result::Result<Option<f64>, VerificationFailure> {
    match payload.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| VerificationFailure::Malformed {
                reason: format!("claim {:?} is not numeric", name),
            }),
    }
}

/// `floor((now_ms + offset_ms) / 1000)`.
fn offset_secs(now_ms: i64, offset_ms: i64) -> i64 {
    now_ms.saturating_add(offset_ms).div_euclid(1000)
}

fn insert_time_claim(claims: &mut Payload, name: &str, date_name: &str, secs: i64) {
    claims.insert(name.to_string(), Value::from(secs));
    if let Some(date) = DateTime::from_timestamp(secs, 0) {
        claims.insert(
            date_name.to_string(),
            Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }
}
