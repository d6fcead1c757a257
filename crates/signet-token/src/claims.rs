//! Registered claims and the options that produce and check them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::duration::TokenDuration;
use crate::error::Result;

/// Issued-at, seconds since the Unix epoch.
pub const IAT: &str = "iat";
/// Issued-at as an ISO-8601 UTC timestamp.
pub const IAT_DATE: &str = "iatDate";
/// Expiration, seconds since the Unix epoch.
pub const EXP: &str = "exp";
pub const EXP_DATE: &str = "expDate";
/// Not-before, seconds since the Unix epoch.
pub const NBF: &str = "nbf";
pub const NBF_DATE: &str = "nbfDate";
pub const AUD: &str = "aud";
pub const SUB: &str = "sub";
pub const ISS: &str = "iss";

/// One audience or several. Serializes as a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn members(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Audience::One(one) => std::slice::from_ref(one),
            Audience::Many(many) => many,
        };
        slice.iter().map(String::as_str)
    }

    /// True if any member of `self` appears in the token's `aud` claim.
    /// A missing or non-string claim matches nothing.
    pub fn matches_claim(&self, claim: Option<&Value>) -> bool {
        let token_members: Vec<&str> = match claim {
            Some(Value::String(one)) => vec![one.as_str()],
            Some(Value::Array(many)) => many.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        self.members().any(|expected| token_members.contains(&expected))
    }

    pub fn to_value(&self) -> Value {
        match self {
            Audience::One(one) => Value::String(one.clone()),
            Audience::Many(many) => Value::Array(many.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Audience::One(audience.to_string())
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Audience::One(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Audience::Many(audiences)
    }
}

impl From<Vec<&str>> for Audience {
    fn from(audiences: Vec<&str>) -> Self {
        Audience::Many(audiences.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Audience {
    fn from(audiences: [&str; N]) -> Self {
        Audience::Many(audiences.iter().map(|a| a.to_string()).collect())
    }
}

/// Claims added when signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOptions {
    pub expires_in: Option<TokenDuration>,
    pub not_before: Option<TokenDuration>,
    pub audience: Option<Audience>,
    pub issuer: Option<String>,
    pub subject: Option<String>,
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires_in(mut self, duration: impl Into<TokenDuration>) -> Self {
        self.expires_in = Some(duration.into());
        self
    }

    pub fn not_before(mut self, duration: impl Into<TokenDuration>) -> Self {
        self.not_before = Some(duration.into());
        self
    }

    /// [`SignOptions::expires_in`] from an expression such as `"1h"`.
    pub fn try_expires_in(self, expr: &str) -> Result<Self> {
        Ok(self.expires_in(TokenDuration::parse(expr)?))
    }

    /// [`SignOptions::not_before`] from an expression such as `"-5s"`.
    pub fn try_not_before(self, expr: &str) -> Result<Self> {
        Ok(self.not_before(TokenDuration::parse(expr)?))
    }

    pub fn audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Claims a token must satisfy. Unset fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    pub issuer: Option<String>,
    /// Any-match: the token passes if it names at least one of these.
    pub audience: Option<Audience>,
    pub subject: Option<String>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_audience_any_match() {
        let expected = Audience::from(["api", "admin"]);
        assert!(expected.matches_claim(Some(&json!("admin"))));
        assert!(expected.matches_claim(Some(&json!(["web", "api"]))));
        assert!(!expected.matches_claim(Some(&json!(["web"]))));
        assert!(!expected.matches_claim(Some(&json!("web"))));
        assert!(!expected.matches_claim(None));
        assert!(!expected.matches_claim(Some(&json!(42))));
    }

    #[test]
    fn test_audience_serializes_untagged() {
        assert_eq!(serde_json::to_value(Audience::from("a")).unwrap(), json!("a"));
        assert_eq!(
            serde_json::to_value(Audience::from(vec!["a", "b"])).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(Audience::from(vec!["a", "b"]).to_value(), json!(["a", "b"]));
        let parsed: Audience = serde_json::from_value(json!(["x"])).unwrap();
        assert_eq!(parsed.members().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_builders_return_new_values() {
        let base = SignOptions::new().issuer("svc");
        let with_sub = base.clone().subject("u1");
        assert_eq!(base.subject, None);
        assert_eq!(with_sub.subject.as_deref(), Some("u1"));
        assert_eq!(with_sub.issuer.as_deref(), Some("svc"));

        let options = SignOptions::new().expires_in(3600i64).not_before(TokenDuration::ZERO);
        assert_eq!(options.expires_in, Some(TokenDuration::from_secs(3600)));
        assert_eq!(options.not_before, Some(TokenDuration::ZERO));
    }

    #[test]
    fn test_duration_expressions() {
        let options = SignOptions::new()
            .try_expires_in("1h")
            .unwrap()
            .try_not_before("-5s")
            .unwrap();
        assert_eq!(options.expires_in, Some(TokenDuration::from_secs(3600)));
        assert_eq!(options.not_before, Some(TokenDuration::from_secs(-5)));
        assert!(matches!(
            SignOptions::new().try_expires_in("soon"),
            Err(crate::error::TokenError::InvalidDuration(_))
        ));
    }
}
