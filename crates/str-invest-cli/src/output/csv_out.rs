use serde_json::Value;
use std::io;

use crate::report::Report;

/// Write output as CSV to stdout.
///
/// Report results are written table by table (title line, header, rows);
/// other results as two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    if let Some(report) = Report::from_envelope(value) {
        for table in report.tables() {
            let _ = wtr.write_record([table.title.as_str()]);
            let _ = wtr.write_record(&table.header);
            for row in &table.rows {
                let _ = wtr.write_record(row);
            }
        }
        let _ = wtr.flush();
        return;
    }

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
