pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::{json, Map, Value};

use crate::commands::evaluation::MemoOutput;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The memo is text; only `--output json` wraps it.
pub fn print_memo(format: &OutputFormat, memo: &MemoOutput) {
    match format {
        OutputFormat::Json => json::print_json(&json!({
            "application_id": memo.application_id,
            "generated_at": memo.generated_at.to_rfc3339(),
            "memo": memo.text,
        })),
        _ => println!("{}", memo.text),
    }
}

/// Flatten nested objects into dotted field names (`ratios.x1`).
/// Arrays are kept as single values.
pub(crate) fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into(&mut rows, None, map);
    rows
}

fn flatten_into(rows: &mut Vec<(String, Value)>, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match val {
            Value::Object(inner) if !inner.is_empty() => flatten_into(rows, Some(&name), inner),
            _ => rows.push((name, val.clone())),
        }
    }
}
