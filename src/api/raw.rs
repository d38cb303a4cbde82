//! Field extraction over loosely-typed JSON.
//!
//! The API answers with several historical shapes, so entity conversion
//! pulls each field out defensively: anything missing or mistyped degrades
//! to the field's default instead of failing the whole response. The only
//! exceptions are the required identity fields, surfaced as [`MissingField`].

use jiff::Timestamp;
use serde_json::Value;

/// A required field was absent from an otherwise-decodable response.
#[derive(Debug, thiserror::Error)]
#[error("response missing required field `{0}`")]
pub(crate) struct MissingField(pub &'static str);

/// Identity fields arrive as either JSON strings or integers.
pub(crate) fn id(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn boolean(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

pub(crate) fn unsigned(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}

pub(crate) fn float(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

pub(crate) fn timestamp(value: &Value, key: &str) -> Option<Timestamp> {
    parse_timestamp(value.get(key)?.as_str()?)
}

/// Parse an ISO-8601 instant, rewriting a trailing literal `Z` to an
/// explicit `+00:00` offset first. Malformed strings yield `None`.
pub(crate) fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let normalized = raw
        .strip_suffix('Z')
        .map(|rest| format!("{rest}+00:00"));
    normalized.as_deref().unwrap_or(raw).parse().ok()
}
