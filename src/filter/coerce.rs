//! Literal rendering for filter values, matching how the web client turns
//! values into text: `String(value)` and `JSON.stringify(value)`.

use serde_json::{Number, Value};

/// Renders a value the way string coercion does: strings verbatim, `null`
/// as `"null"`, arrays joined with `,` and objects as `[object Object]`.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Compact JSON text with integral floats printed without a fraction.
pub fn to_json_literal(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(n),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(to_json_literal).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}:{}", Value::from(key.as_str()), to_json_literal(value)))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        other => other.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        // Covers -0.0, which renders as plain 0.
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::integer(json!(30), "30")]
    #[case::integral_float(json!(30.0), "30")]
    #[case::float(json!(2.5), "2.5")]
    #[case::negative_zero(json!(-0.0), "0")]
    #[case::string(json!("abc"), "abc")]
    #[case::null(json!(null), "null")]
    #[case::boolean(json!(false), "false")]
    #[case::array(json!(["a", 1, null]), "a,1,")]
    #[case::object(json!({"a": 1}), "[object Object]")]
    fn test_coerce_to_string(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(coerce_to_string(&value), expected);
    }

    #[rstest]
    #[case::integer(json!(5), "5")]
    #[case::integral_float(json!(5.0), "5")]
    #[case::string(json!("x"), r#""x""#)]
    #[case::escaped(json!("it's \"q\""), r#""it's \"q\"""#)]
    #[case::null(json!(null), "null")]
    #[case::array(json!(["a", 2.0]), r#"["a",2]"#)]
    #[case::object(json!({"k": [true]}), r#"{"k":[true]}"#)]
    #[case::insertion_order(json!({"b": 1, "a": 2}), r#"{"b":1,"a":2}"#)]
    #[case::negative_zero(json!(-0.0), "0")]
    fn test_to_json_literal(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(to_json_literal(&value), expected);
    }
}
