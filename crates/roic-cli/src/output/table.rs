use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::output::payload;

/// Format the response payload as a field/value table.
pub fn print_table(value: &Value) {
    let data = payload(value);
    match data {
        Value::Object(_) => print_object_table(data),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", data),
    }

    // Surface a non-success status below the table.
    if let Some(Value::String(status)) = value.as_object().and_then(|m| m.get("status")) {
        if status != "success" {
            if let Some(Value::String(msg)) = value.as_object().and_then(|m| m.get("message")) {
                println!("\n{}: {}", status, msg);
            }
        }
    }
}

fn print_object_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            // Nested method results get their own tables.
            if let Value::Object(nested) = val {
                if nested.contains_key("roic_pct") {
                    continue;
                }
            }
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);

        // One table per nested method result, labelled by key.
        for (key, val) in map {
            if let Value::Object(nested) = val {
                if nested.contains_key("roic_pct") {
                    println!("\n{}:", key);
                    print_object_table(val);
                }
            }
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let mut builder = Builder::default();
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        builder.push_record(headers.clone());
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "—".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_null_is_dash() {
        assert_eq!(format_value(&Value::Null), "—");
    }

    #[test]
    fn test_format_value_nested_is_json() {
        let v = serde_json::json!({"a": 1});
        assert_eq!(format_value(&v), "{\"a\":1}");
    }
}
