use serde_json::Value;

/// Key answer fields, in priority order.
const PRIORITY_KEYS: [&str; 4] = ["display_score", "decision", "risk_label", "risk_category"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

/// Heuristic: look for well-known result fields in order of priority, then
/// fall back to the first field in the result object. A score is printed
/// with its risk label when both are present.
pub fn render_minimal(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let (Some(score), Some(Value::String(label))) =
            (map.get("display_score"), map.get("risk_label"))
        {
            return format!("{} {}", format_minimal(score), label);
        }

        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
