//! # Signet Token
//!
//! A compact signed-token format modeled on JWT:
//!
//! ```text
//! base64({"alg":"HS256","typ":"SIGNET+JWT"}) . base64(canonical payload) . base64(hmac)
//! ```
//!
//! The payload carries registered claims (`iat`, `iatDate`, `exp`, `expDate`,
//! `nbf`, `nbfDate`, `aud`, `sub`, `iss`) merged with caller fields.
//! Verification is a pure function of the token, the secret, the clock and
//! the requested claims, and returns a [`Verification`] rather than an
//! error so callers can branch on the outcome.
//!
//! ```rust,ignore
//! let signet = Signet::new("secret")?;
//! let token = signet.sign(&json!({"sub": "u1"}), &SignOptions::new().expires_in(3600i64))?;
//! assert!(signet.verify(&token, &VerifyOptions::new()).is_valid());
//! ```

pub mod canonical;
pub mod claims;
pub mod duration;
pub mod error;
pub mod token;

pub use canonical::to_canonical_json;
pub use claims::{Audience, SignOptions, VerifyOptions};
pub use duration::TokenDuration;
pub use error::{Segment, TokenError, VerificationFailure};
pub use token::{
    decode, DecodedToken, Payload, Signet, TokenHeader, Verification, ALGORITHM, TOKEN_TYPE,
};
