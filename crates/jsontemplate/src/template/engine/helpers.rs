//! Helper functions for template expansion

use serde_json::Value;

/// Maximum characters of a value shown in error messages
const PREVIEW_LIMIT: usize = 60;

/// Whether a section over this value is taken
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Type name used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Human-readable string for a value, `None` for null
///
/// Strings are returned unquoted; lists and maps as compact JSON.
pub(crate) fn stringify_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Short JSON rendering of a value for error messages
pub(crate) fn preview_value(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= PREVIEW_LIMIT {
        return text;
    }
    let truncated: String = text.chars().take(PREVIEW_LIMIT).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&value), "{} should be falsy", value);
        }
    }

    #[test]
    fn test_truthy_values() {
        for value in [
            json!(true),
            json!(1),
            json!(-0.5),
            json!("x"),
            json!([1]),
            json!({"k": 1}),
        ] {
            assert!(is_truthy(&value), "{} should be truthy", value);
        }
    }

    #[test]
    fn test_stringify_value() {
        assert_eq!(stringify_value(&json!("a")).as_deref(), Some("a"));
        assert_eq!(stringify_value(&json!(5)).as_deref(), Some("5"));
        assert_eq!(stringify_value(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(stringify_value(&json!(true)).as_deref(), Some("true"));
        assert_eq!(stringify_value(&json!([1, "a"])).as_deref(), Some("[1,\"a\"]"));
        assert_eq!(stringify_value(&json!({"b": 1, "a": 2})).as_deref(), Some("{\"a\":2,\"b\":1}"));
        assert_eq!(stringify_value(&json!(null)), None);
    }

    #[test]
    fn test_preview_truncates() {
        let long = json!("x".repeat(200));
        let preview = preview_value(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_LIMIT + 3);
    }
}
