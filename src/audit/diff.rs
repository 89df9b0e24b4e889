//! Human-readable diffs for audit entries

use serde_json::Value;

const MAX_STRING_CHARS: usize = 50;

/// Describe the top-level field changes between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val == before_val => {}
                    Some(after_val) => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => {
            vec![format!("{} -> {}", format_value(before), format_value(after))]
        }
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"category": "rent", "amount": 300.0});
        let after = json!({"category": "rent", "amount": 325.5});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 300.0 -> 325.5");
    }

    #[test]
    fn test_description_added_and_removed() {
        let before = json!({"category": "rent"});
        let after = json!({"category": "rent", "description": "March"});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "description: (added) -> \"March\""
        );
        assert_eq!(
            generate_diff(&after, &before).unwrap(),
            "description: \"March\" -> (removed)"
        );
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"category": "food", "amount": 10});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let before = json!({"description": "₹".repeat(80)});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!([1]), &json!([1])).is_none());
    }
}
