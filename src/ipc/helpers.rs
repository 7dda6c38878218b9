//! Param extraction for the request envelope. Numeric fields accept either
//! JSON numbers or the raw form-field strings the frontend sends; coercion
//! failures are validation errors, reported before anything is written.

use serde_json::Value;

pub fn text_param(params: &Value, key: &str) -> Result<String, String> {
    match params.get(key).and_then(|v| v.as_str()) {
        Some(v) => Ok(v.trim().to_string()),
        None => Err(format!("missing {key}")),
    }
}

/// Int-parseable identifier.
pub fn id_param(params: &Value, key: &str) -> Result<i64, String> {
    match params.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| format!("{key} must be an integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{key} must be an integer")),
        _ => Err(format!("missing {key}")),
    }
}

/// Float-parseable grade value.
pub fn value_param(params: &Value, key: &str) -> Result<f64, String> {
    match params.get(key) {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| format!("{key} must be numeric")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{key} must be numeric")),
        _ => Err(format!("missing {key}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_param_accepts_numbers_and_digit_strings() {
        let params = json!({ "a": 7, "b": " 12 ", "c": "abc", "d": 1.5 });
        assert_eq!(id_param(&params, "a"), Ok(7));
        assert_eq!(id_param(&params, "b"), Ok(12));
        assert!(id_param(&params, "c").is_err());
        assert!(id_param(&params, "d").is_err());
        assert!(id_param(&params, "missing").is_err());
    }

    #[test]
    fn value_param_accepts_numbers_and_float_strings() {
        let params = json!({ "a": 8.5, "b": "6.25", "c": "oops" });
        assert_eq!(value_param(&params, "a"), Ok(8.5));
        assert_eq!(value_param(&params, "b"), Ok(6.25));
        assert!(value_param(&params, "c").is_err());
    }

    #[test]
    fn text_param_trims() {
        let params = json!({ "name": "  Ana " });
        assert_eq!(text_param(&params, "name").unwrap(), "Ana");
        assert!(text_param(&params, "other").is_err());
    }
}
