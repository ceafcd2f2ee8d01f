use crate::model::RawRecord;
use serde_json::Value;

/// Reads a cell as a finite number.
///
/// JSON numbers are taken as-is; strings are trimmed and parsed as a plain
/// decimal. Empty strings, `null`, booleans, containers and text such as
/// `"inf"` or `"NaN"` yield `None`.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// True for cells that carry no value at all (`null` or blank text).
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Columns whose value in `sample` is numeric, in the sample's key order.
///
/// The result is applied to every row of the dataset: a column that is
/// numeric here but textual in a later row stays numeric, and that row's
/// value is left out of its own average.
pub fn discover_numeric_columns(sample: &RawRecord) -> Vec<String> {
    sample
        .iter()
        .filter(|(_, value)| numeric_value(value).is_some())
        .map(|(column, _)| column.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_text() {
        assert_eq!(numeric_value(&json!(42)), Some(42.0));
        assert_eq!(numeric_value(&json!(-3.5)), Some(-3.5));
        assert_eq!(numeric_value(&json!(" 87.5 ")), Some(87.5));
        assert_eq!(numeric_value(&json!("1e2")), Some(100.0));
    }

    #[test]
    fn rejects_non_finite_and_non_numeric() {
        for value in [
            json!(""),
            json!("   "),
            json!(null),
            json!(true),
            json!("abc"),
            json!("12abc"),
            json!("inf"),
            json!("NaN"),
            json!([1]),
            json!({"a": 1}),
        ] {
            assert_eq!(numeric_value(&value), None, "{value} should not be numeric");
        }
    }

    #[test]
    fn discovery_follows_key_order_of_sample() {
        let sample: RawRecord = serde_json::from_value(json!({
            "name": "Ada",
            "reading": "90",
            "notes": "",
            "math": 80,
            "absent": null
        }))
        .unwrap();
        assert_eq!(discover_numeric_columns(&sample), vec!["reading", "math"]);
    }

    #[test]
    fn textual_sample_value_excludes_column() {
        let sample = RawRecord::new().with("name", "A").with("score", "abc");
        assert!(discover_numeric_columns(&sample).is_empty());
    }
}
