//! Decoding of the JSON-encoded argument blobs the indexer stores for
//! extrinsics, calls and events.
//!
//! The blob is a JSON document serialized into a string column. Argument
//! values are frequently JSON documents themselves (e.g. a `call` argument of
//! `Utility.batch`), so string leaves that hold an object or array are
//! expanded too, up to [`MAX_DEPTH`] levels.

use anyhow::{Context, Result};
use serde_json::Value;

pub const MAX_DEPTH: usize = 5;

/// Parse a stored argument blob into a structured value.
pub fn parse_args(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).with_context(|| format!("malformed args blob: {}", preview(raw)))?;
    Ok(expand_nested(value, MAX_DEPTH))
}

/// Like [`parse_args`] but an empty or `null` blob is `None`.
pub fn parse_optional_args(raw: Option<&str>) -> Result<Option<Value>> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(raw) => parse_args(raw).map(Some),
    }
}

/// Expand JSON-serialized strings inside `value`, `depth` levels deep.
pub fn expand_nested(value: Value, depth: usize) -> Value {
    if depth == 0 {
        return value;
    }
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(|v| expand_nested(v, depth - 1)).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, expand_nested(v, depth - 1))).collect()),
        Value::String(s) => {
            let t = s.trim();
            let looks_structured = (t.starts_with('{') && t.ends_with('}')) || (t.starts_with('[') && t.ends_with(']'));
            match looks_structured.then(|| serde_json::from_str::<Value>(t)) {
                Some(Ok(parsed)) => expand_nested(parsed, depth - 1),
                _ => Value::String(s),
            }
        }
        other => other,
    }
}

fn preview(raw: &str) -> String {
    let mut p: String = raw.chars().take(40).collect();
    if raw.chars().count() > 40 {
        p.push('…');
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_blob() {
        let v = parse_args(r#"{"dest":"5Grw","value":"1000"}"#).unwrap();
        assert_eq!(v, json!({"dest": "5Grw", "value": "1000"}));
    }

    #[test]
    fn expands_serialized_call_argument() {
        let v = parse_args(r#"{"calls":"[{\"method\":\"remark\"}]"}"#).unwrap();
        assert_eq!(v, json!({"calls": [{"method": "remark"}]}));
    }

    #[test]
    fn keeps_strings_that_are_not_json() {
        let v = parse_args(r#"["{not json}", "hello"]"#).unwrap();
        assert_eq!(v, json!(["{not json}", "hello"]));
    }

    #[test]
    fn depth_is_bounded() {
        let v = expand_nested(json!({"a": "{\"b\":\"{\\\"c\\\":1}\"}"}), 2);
        assert_eq!(v, json!({"a": {"b": "{\"c\":1}"}}));
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let err = parse_args("{oops").unwrap_err();
        assert!(err.to_string().contains("malformed args blob"));
    }

    #[test]
    fn optional_blob() {
        assert_eq!(parse_optional_args(None).unwrap(), None);
        assert_eq!(parse_optional_args(Some("null")).unwrap(), None);
        assert_eq!(parse_optional_args(Some("[1]")).unwrap(), Some(json!([1])));
    }
}
