use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::report::{envelope_warnings, Report, ReportTable};

/// Format output as a table using the tabled crate.
///
/// Results with a report layout (model run, base model, season breakdown,
/// sensitivity grid) print their formatted report tables; anything else
/// prints as field/value pairs.
pub fn print_table(value: &Value) {
    if let Some(report) = Report::from_envelope(value) {
        for table in report.tables() {
            println!("{}", render_report_table(&table));
        }
        print_warnings(value);
        return;
    }

    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    // Print the result section
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    print_warnings(&Value::Object(envelope.clone()));

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn render_report_table(table: &ReportTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.header.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }
    format!("{}\n{}", table.title, Table::from(builder))
}

fn print_warnings(envelope: &Value) {
    let warnings = envelope_warnings(envelope);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in warnings {
            println!("  - {}", w);
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
