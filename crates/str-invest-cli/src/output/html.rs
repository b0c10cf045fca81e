use serde_json::Value;

use crate::report::{envelope_warnings, Report, ReportTable};

/// Escape text for inclusion in HTML element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one report table as an HTML fragment.
pub fn render_table(table: &ReportTable) -> String {
    let mut html = format!("<h2>{}</h2>\n<table class=\"results-table\">\n", escape(&table.title));

    if !table.groups.is_empty() {
        html.push_str("  <tr>\n");
        if let Some(first) = table.header.first() {
            html.push_str(&format!("    <th rowspan=\"2\">{}</th>\n", escape(first)));
        }
        for (label, span) in &table.groups {
            html.push_str(&format!(
                "    <th colspan=\"{span}\">{}</th>\n",
                escape(label)
            ));
        }
        html.push_str("  </tr>\n  <tr>\n");
        for h in table.header.iter().skip(1) {
            // group already names the expense rate
            let short = h.split_once(" / ").map_or(h.as_str(), |(_, s)| s);
            html.push_str(&format!("    <th>{}</th>\n", escape(short)));
        }
        html.push_str("  </tr>\n");
    } else {
        html.push_str("  <tr>\n");
        for h in &table.header {
            html.push_str(&format!("    <th>{}</th>\n", escape(h)));
        }
        html.push_str("  </tr>\n");
    }

    for row in &table.rows {
        html.push_str("  <tr>\n");
        for cell in row {
            html.push_str(&format!("    <td>{}</td>\n", escape(cell)));
        }
        html.push_str("  </tr>\n");
    }

    html.push_str("</table>\n");
    html
}

/// Render a whole computation envelope as HTML, or `None` when the result has
/// no report layout.
pub fn render_report(value: &Value) -> Option<String> {
    let report = Report::from_envelope(value)?;
    let mut html: String = report.tables().iter().map(render_table).collect();

    let warnings = envelope_warnings(value);
    if !warnings.is_empty() {
        html.push_str("<ul class=\"warnings\">\n");
        for w in &warnings {
            html.push_str(&format!("  <li>{}</li>\n", escape(w)));
        }
        html.push_str("</ul>\n");
    }
    Some(html)
}

/// Print HTML tables to stdout, falling back to JSON for results without a
/// report layout.
pub fn print_html(value: &Value) {
    match render_report(value) {
        Some(html) => print!("{html}"),
        None => super::json::print_json(value),
    }
}
