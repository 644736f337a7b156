//! Classification helpers for JSON values taking part in a merge.

use serde_json::Value;

/// Returns `true` for values an update treats as "no input".
///
/// Blank values are `null`, numeric zero (integer or float), the empty
/// string and `false`. Arrays and objects are never blank, even when empty.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns `true` for booleans, numbers and strings.
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!(0)));
        assert!(is_blank(&json!(0.0)));
        assert!(is_blank(&json!(-0.0)));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!(false)));
    }

    #[test]
    fn present_values() {
        assert!(!is_blank(&json!(1)));
        assert!(!is_blank(&json!(-3)));
        assert!(!is_blank(&json!(0.5)));
        assert!(!is_blank(&json!("0")));
        assert!(!is_blank(&json!(true)));
    }

    #[test]
    fn containers_are_never_blank() {
        assert!(!is_blank(&json!([])));
        assert!(!is_blank(&json!({})));
    }

    #[test]
    fn scalars() {
        assert!(is_scalar(&json!(true)));
        assert!(is_scalar(&json!(42)));
        assert!(is_scalar(&json!("x")));
        assert!(!is_scalar(&Value::Null));
        assert!(!is_scalar(&json!([1])));
        assert!(!is_scalar(&json!({"a": 1})));
    }
}
