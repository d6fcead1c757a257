//! Canonical JSON encoding for deterministic signing input.
//!
//! - Compact: no whitespace between tokens
//! - Object keys sorted at every nesting level
//! - Arrays keep their order
//! - Integral floats written as integers (`1.0` becomes `1`)
//! - Strings escape only `"`, `\` and control characters
//!
//! Identical logical payloads always produce identical bytes, and therefore
//! identical signatures.

use serde_json::{Map, Number, Value};

/// Largest magnitude written in plain integer notation.
const PLAIN_INTEGER_LIMIT: f64 = 1e21;

/// Encode a JSON value canonically.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    encode_value_to(&mut out, value);
    out
}

fn encode_value_to(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => encode_number(out, n),
        Value::String(s) => encode_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value_to(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => encode_object_canonical(out, map),
    }
}

fn encode_object_canonical(out: &mut String, map: &Map<String, Value>) {
    // Sorted explicitly: the map's own iteration order depends on serde_json features.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_string(out, key);
        out.push(':');
        encode_value_to(out, value);
    }
    out.push('}');
}

fn encode_number(out: &mut String, n: &Number) {
    if n.is_i64() || n.is_u64() {
        out.push_str(&n.to_string());
        return;
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => out.push('0'),
        Some(f) if f.fract() == 0.0 && f.abs() < PLAIN_INTEGER_LIMIT => {
            out.push_str(&format!("{:.0}", f));
        }
        _ => out.push_str(&n.to_string()),
    }
}

fn encode_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_sorted_at_every_level() {
        let value = json!({
            "zeta": 1,
            "alpha": {"b": [3, {"y": true, "x": null}], "a": "s"},
            "mid": []
        });
        assert_eq!(
            to_canonical_json(&value),
            r#"{"alpha":{"a":"s","b":[3,{"x":null,"y":true}]},"mid":[],"zeta":1}"#
        );
    }

    #[test]
    fn test_same_content_same_bytes() {
        let a = json!({"sub": "u1", "iat": 100, "nested": {"k1": 1, "k2": 2}});
        let b = json!({"nested": {"k2": 2, "k1": 1}, "iat": 100, "sub": "u1"});
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
    }

    #[test]
    fn test_integral_floats_as_integers() {
        assert_eq!(to_canonical_json(&json!(1.0)), "1");
        assert_eq!(to_canonical_json(&json!(-3.0)), "-3");
        assert_eq!(to_canonical_json(&json!(-0.0)), "0");
        assert_eq!(to_canonical_json(&json!(1.5)), "1.5");
        assert_eq!(to_canonical_json(&json!(1e20)), "100000000000000000000");
        assert_eq!(to_canonical_json(&json!(u64::MAX)), "18446744073709551615");
        assert_eq!(to_canonical_json(&json!(i64::MIN)), "-9223372036854775808");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            to_canonical_json(&json!("a\"b\\c\n\t\u{01}é🦀")),
            "\"a\\\"b\\\\c\\n\\t\\u0001é🦀\""
        );
        assert_eq!(to_canonical_json(&json!("/")), "\"/\"");
    }

    #[test]
    fn test_escaping_agrees_with_serde_json() {
        let value = json!({"k": "line\nbreak \u{1f} \"quoted\" \\ back"});
        let expected = serde_json::to_string(&value).unwrap();
        assert_eq!(to_canonical_json(&value), expected);
    }

    #[test]
    fn test_header_encoding() {
        let header = json!({"typ": "SIGNET+JWT", "alg": "HS256"});
        assert_eq!(
            to_canonical_json(&header),
            r#"{"alg":"HS256","typ":"SIGNET+JWT"}"#
        );
    }
}
