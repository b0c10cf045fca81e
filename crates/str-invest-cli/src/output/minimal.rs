use serde_json::Value;

/// Print just the key answer value from the output.
///
/// A model run prints one `label: cash-on-cash` line per apartment; other
/// results print the first well-known field present, falling back to the
/// first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(apartments)) = result_obj.get("apartments") {
        for apt in apartments {
            let base = &apt["base"];
            println!(
                "{}: {}",
                format_minimal(&base["label"]),
                format_minimal(&base["cash_on_cash_pct"])
            );
        }
        return;
    }

    // Priority list of key output fields
    let priority_keys = [
        "cash_on_cash_pct",
        "revenue",
        "total_gross_revenue",
        "weighted_average_adr",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
