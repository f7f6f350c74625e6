use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::flatten;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result @ Value::Object(_)) => render_envelope(result, map),
            _ => field_table(value),
        },
        Value::Array(arr) => array_table(arr),
        _ => value.to_string(),
    }
}

fn render_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) -> String {
    let mut out = field_table(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\n\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    out.push_str(&format!("\n  - {}", s));
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        out.push_str(&format!("\n\nMethodology: {}", meth));
    }
    out
}

fn field_table(value: &Value) -> String {
    let Value::Object(map) = value else {
        return format_value(value);
    };
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        builder.push_record([key, format_value(&val)]);
    }
    Table::from(builder).to_string()
}

fn array_table(arr: &[Value]) -> String {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            return "(empty)".to_string();
        }
        return arr.iter().map(format_value).collect::<Vec<_>>().join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    Table::from(builder).to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.iter().all(|v| !v.is_object()) {
                arr.iter().map(format_value).collect::<Vec<_>>().join(", ")
            } else {
                serde_json::to_string(value).unwrap_or_default()
            }
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
