//! Deterministic JSON serialization.
//!
//! Two renderings of a [`JsonValue`]: a compact single-line form used as the
//! equality key and array sort key, and an indented multi-line form used for
//! line-level comparison and persisted artifacts. Both go through
//! `serde_json::Value`, whose map keeps keys sorted, so object members come
//! out in key order.

use serde_json::Value;

use super::types::JsonValue;

/// Serialize a JsonValue to compact deterministic JSON.
pub fn canonicalize(value: &JsonValue) -> String {
    Value::from(value).to_string()
}

/// Serialize a JsonValue as indented multi-line JSON.
///
/// Two spaces per level, one member per line, `": "` between key and
/// value, empty containers kept on one line.
pub fn to_pretty(value: &JsonValue) -> String {
    format!("{:#}", Value::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn parse(text: &str) -> JsonValue {
        serde_json::from_str::<serde_json::Value>(text).unwrap().into()
    }

    #[test]
    fn test_canonicalize_primitives() {
        assert_eq!(canonicalize(&JsonValue::Null), "null");
        assert_eq!(canonicalize(&JsonValue::Bool(true)), "true");
        assert_eq!(canonicalize(&JsonValue::Bool(false)), "false");
        assert_eq!(canonicalize(&JsonValue::from(42)), "42");
        assert_eq!(canonicalize(&parse("1.5")), "1.5");
        assert_eq!(canonicalize(&parse("18446744073709551616")), "18446744073709551616");
    }

    #[test]
    fn test_canonicalize_string_escapes() {
        assert_eq!(canonicalize(&JsonValue::from("a\nb")), "\"a\\nb\"");
        assert_eq!(canonicalize(&JsonValue::from("a\tb")), "\"a\\tb\"");
        assert_eq!(canonicalize(&JsonValue::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(canonicalize(&JsonValue::from("a\\b")), "\"a\\\\b\"");
        assert_eq!(canonicalize(&JsonValue::from("\u{1}")), "\"\\u0001\"");
    }

    #[test]
    fn test_canonicalize_object_sorted() {
        let mut obj = BTreeMap::new();
        obj.insert("b".to_string(), JsonValue::from(2));
        obj.insert("a".to_string(), JsonValue::from(1));
        assert_eq!(canonicalize(&JsonValue::Object(obj)), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn test_canonicalize_keeps_array_order() {
        assert_eq!(canonicalize(&parse("[3,1,2]")), "[3,1,2]");
    }

    #[test]
    fn test_canonicalize_empty_containers() {
        assert_eq!(canonicalize(&JsonValue::Array(vec![])), "[]");
        assert_eq!(canonicalize(&JsonValue::Object(BTreeMap::new())), "{}");
    }

    #[test]
    fn test_pretty_layout() {
        let value = parse(r#"{"b":[1,{}],"a":"x","c":[]}"#);
        let expected = "{\n  \"a\": \"x\",\n  \"b\": [\n    1,\n    {}\n  ],\n  \"c\": []\n}";
        assert_eq!(to_pretty(&value), expected);
    }

    #[test]
    fn test_pretty_scalar() {
        assert_eq!(to_pretty(&JsonValue::from(7)), "7");
    }
}
