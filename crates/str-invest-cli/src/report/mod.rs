pub mod format;
pub mod tables;

use serde_json::Value;

use str_invest_core::base_model::base::BaseResult;
use str_invest_core::model::run::InvestmentModelOutput;
use str_invest_core::seasonal::breakdown::SeasonBreakdown;
use str_invest_core::sensitivity::grid::SensitivityTable;

/// A rendered-agnostic table: title, optional column groups, header and rows.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    pub title: String,
    /// (label, span) groups above the header, excluding the first column
    pub groups: Vec<(String, usize)>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Typed view of a computation result that has a dedicated report layout.
pub enum Report {
    Model(InvestmentModelOutput),
    Sensitivity(SensitivityTable),
    Breakdown(SeasonBreakdown),
    Base(BaseResult),
}

impl Report {
    /// Recognise the `result` section of a computation envelope.
    pub fn from_envelope(value: &Value) -> Option<Report> {
        let result = value.get("result")?;
        if let Ok(m) = serde_json::from_value(result.clone()) {
            return Some(Report::Model(m));
        }
        if let Ok(s) = serde_json::from_value(result.clone()) {
            return Some(Report::Sensitivity(s));
        }
        if let Ok(b) = serde_json::from_value(result.clone()) {
            return Some(Report::Breakdown(b));
        }
        serde_json::from_value(result.clone()).ok().map(Report::Base)
    }

    /// Tables in display order: season breakdowns, base model, sensitivity.
    pub fn tables(&self) -> Vec<ReportTable> {
        match self {
            Report::Model(m) => {
                let mut out: Vec<ReportTable> = m
                    .apartments
                    .iter()
                    .map(|a| tables::breakdown_table(&a.season_breakdown))
                    .collect();
                let bases: Vec<BaseResult> =
                    m.apartments.iter().map(|a| a.base.clone()).collect();
                out.push(tables::base_table(&bases, Some(m.base_expense_rate)));
                out.extend(
                    m.apartments
                        .iter()
                        .map(|a| tables::sensitivity_table(&a.sensitivity)),
                );
                out
            }
            Report::Sensitivity(s) => vec![tables::sensitivity_table(s)],
            Report::Breakdown(b) => vec![tables::breakdown_table(b)],
            Report::Base(b) => vec![tables::base_table(std::slice::from_ref(b), None)],
        }
    }
}

/// Warnings carried by a computation envelope.
pub fn envelope_warnings(value: &Value) -> Vec<String> {
    match value.get("warnings") {
        Some(Value::Array(ws)) => ws
            .iter()
            .filter_map(|w| w.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
