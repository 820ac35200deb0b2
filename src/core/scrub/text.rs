//! Plain-text rendering of scrubbed trees
//!
//! Each scalar becomes a `key: value` line. Objects and arrays become a `key:`
//! line followed by their children indented two more spaces; array children
//! use their index as the key. String values are written as-is, so a
//! multi-line value continues on the following lines without indentation.

use serde_json::{Map, Number, Value};

/// Extra indentation per nesting level
const INDENT_STEP: usize = 2;

/// Render a field map as indented `key: value` lines joined by `\n`
pub fn render_txt(fields: &Map<String, Value>) -> String {
    let mut lines = Vec::new();
    for (key, value) in fields {
        render_value(key, value, 0, &mut lines);
    }
    lines.join("\n")
}

fn render_value(key: &str, value: &Value, indent: usize, lines: &mut Vec<String>) {
    let prefix = " ".repeat(indent);

    match value {
        Value::Object(map) => {
            lines.push(format!("{prefix}{key}:"));
            for (child_key, child) in map {
                render_value(child_key, child, indent + INDENT_STEP, lines);
            }
        }
        Value::Array(items) => {
            lines.push(format!("{prefix}{key}:"));
            for (index, child) in items.iter().enumerate() {
                render_value(&index.to_string(), child, indent + INDENT_STEP, lines);
            }
        }
        scalar => lines.push(format!("{prefix}{key}: {}", scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(_) | Value::Array(_) => String::new(),
    }
}

/// Integral floats print without a fractional part
fn number_text(number: &Number) -> String {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            if float.fract() == 0.0 && float.abs() < 1e15 {
                return format!("{}", float as i64);
            }
            return float.to_string();
        }
    }
    number.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        match value {
            Value::Object(map) => render_txt(&map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_flat_scalars() {
        assert_eq!(
            render(json!({"name": "Dagger", "weight": 1, "price": 2.5})),
            "name: Dagger\nweight: 1\nprice: 2.5"
        );
    }

    #[test]
    fn test_nested_objects_indent() {
        let text = render(json!({
            "name": "Goblin",
            "system": {"details": {"biography": "Small and green."}, "hp": 7}
        }));
        assert_eq!(
            text,
            "name: Goblin\nsystem:\n  details:\n    biography: Small and green.\n  hp: 7"
        );
    }

    #[test]
    fn test_arrays_use_indices() {
        let text = render(json!({"tags": ["light", "finesse"], "rows": [{"a": "x"}]}));
        assert_eq!(
            text,
            "tags:\n  0: light\n  1: finesse\nrows:\n  0:\n    a: x"
        );
    }

    #[test]
    fn test_integral_float_prints_as_integer() {
        assert_eq!(render(json!({"n": 3.0, "m": -12.0})), "n: 3\nm: -12");
    }

    #[test]
    fn test_multiline_string_kept_verbatim() {
        assert_eq!(
            render(json!({"text": "Line one\nLine two"})),
            "text: Line one\nLine two"
        );
    }

    #[test]
    fn test_deeply_nested_mixed_containers() {
        let text = render(json!({
            "a": {"b": [{"c": {"d": [1, {"e": "deep"}]}}]}
        }));
        assert_eq!(
            text,
            "a:\n  b:\n    0:\n      c:\n        d:\n          0: 1\n          1:\n            e: deep"
        );
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(render_txt(&Map::new()), "");
    }
}
