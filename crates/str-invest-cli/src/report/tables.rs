use rust_decimal::Decimal;

use str_invest_core::base_model::base::BaseResult;
use str_invest_core::seasonal::breakdown::SeasonBreakdown;
use str_invest_core::sensitivity::grid::{ScenarioMetrics, SensitivityTable};
use str_invest_core::types::Rate;

use super::format::{format_fraction, format_number, format_opt, format_pct};
use super::ReportTable;

/// Currency shown in column labels.
pub const CURRENCY: &str = "CHF";

/// Base-model comparison: one column per apartment.
pub fn base_table(apartments: &[BaseResult], expense_rate: Option<Rate>) -> ReportTable {
    let title = match expense_rate {
        Some(rate) => format!(
            "Base Model Results (User Expense Rate: {})",
            format_fraction(rate)
        ),
        None => "Base Model Results".to_string(),
    };

    let mut header = vec!["Parameter".to_string()];
    header.extend(apartments.iter().map(|a| a.label.clone()));

    let row = |label: String, cell: &dyn Fn(&BaseResult) -> String| -> Vec<String> {
        let mut r = vec![label];
        r.extend(apartments.iter().map(cell));
        r
    };

    let rows = vec![
        row("Size (m²)".into(), &|a| format_number(a.size_area, 0)),
        row(format!("Purchase Price ({CURRENCY})"), &|a| {
            format_number(a.purchase_price, 0)
        }),
        row(format!("Down Payment ({CURRENCY})"), &|a| {
            format_number(a.down_payment, 0)
        }),
        row(format!("Financed Amount ({CURRENCY})"), &|a| {
            format_number(a.financed_amount, 0)
        }),
        row(format!("Average ADR ({CURRENCY}/night)"), &|a| {
            format_opt(a.weighted_average_adr, 2)
        }),
        row(format!("Annual Gross Revenue ({CURRENCY})"), &|a| {
            format_number(a.gross_revenue, 0)
        }),
        row("NOI (after user expense rate)".into(), &|a| {
            format_number(a.net_operating_income, 0)
        }),
        row(format!("Annual Mortgage Interest ({CURRENCY})"), &|a| {
            format_number(a.annual_interest, 0)
        }),
        row(format!("Annual Cash Flow ({CURRENCY})"), &|a| {
            format_number(a.annual_cash_flow, 0)
        }),
        row("Cash-on-Cash ROI (%)".into(), &|a| format_pct(a.cash_on_cash_pct, 2)),
        row("Cap Rate (%)".into(), &|a| format_pct(a.cap_rate_pct, 2)),
    ];

    ReportTable {
        title,
        groups: Vec::new(),
        header,
        rows,
    }
}

/// Season-by-season revenue for one apartment.
pub fn breakdown_table(b: &SeasonBreakdown) -> ReportTable {
    let header = vec![
        "Season".to_string(),
        "Days".to_string(),
        "Occupancy".to_string(),
        format!("ADR ({CURRENCY})"),
        "Booked Nights".to_string(),
        format!("Gross Revenue ({CURRENCY})"),
    ];

    let mut rows: Vec<Vec<String>> = b
        .seasons
        .iter()
        .map(|l| {
            vec![
                l.season.label().to_string(),
                format_number(l.days, 0),
                format_fraction(l.occupancy),
                format_number(l.rate, 0),
                format_number(l.booked_nights, 0),
                format_number(l.gross_revenue, 0),
            ]
        })
        .collect();

    let dash = || "—".to_string();
    rows.push(vec![
        "Total Annual Gross Revenue".into(),
        dash(),
        dash(),
        dash(),
        format_number(b.total_booked_nights, 0),
        format_number(b.total_gross_revenue, 0),
    ]);
    rows.push(vec![
        "ADR per night".into(),
        dash(),
        dash(),
        dash(),
        dash(),
        format_opt(b.adr_per_booked_night, 2),
    ]);
    rows.push(vec![
        "NOI (75%)".into(),
        dash(),
        dash(),
        dash(),
        dash(),
        format_number(b.noi_at_reference_expense, 0),
    ]);

    ReportTable {
        title: format!(
            "{} APARTMENT ({} M²) - Breakdown by Season",
            b.label.to_uppercase(),
            format_number(b.size_area, 0)
        ),
        groups: Vec::new(),
        header,
        rows,
    }
}

/// Heading for an expense-rate column group, e.g. "20% OE → NOI = 80% of Gross".
fn expense_group_label(rate: Rate) -> String {
    format!(
        "{} OE → NOI = {} of Gross",
        format_fraction(rate),
        format_fraction(Decimal::ONE - rate)
    )
}

/// 3x3 expense x occupancy sensitivity for one apartment.
pub fn sensitivity_table(t: &SensitivityTable) -> ReportTable {
    let groups: Vec<(String, usize)> = t
        .expense_rates
        .iter()
        .map(|r| (expense_group_label(*r), t.occupancy_scenarios.len()))
        .collect();

    let mut header = vec!["Metric".to_string()];
    for rate in &t.expense_rates {
        for s in &t.occupancy_scenarios {
            header.push(format!("{} OE / {}", format_fraction(*rate), s.label()));
        }
    }

    let row = |label: String, cell: &dyn Fn(&ScenarioMetrics) -> String| -> Vec<String> {
        let mut r = vec![label];
        r.extend(t.cells().map(cell));
        r
    };

    let adr = format_opt(t.weighted_average_adr, 2);
    let rows = vec![
        row(format!("ADR per night ({CURRENCY})"), &|_| adr.clone()),
        row("Booked Nights".into(), &|c| format_number(c.booked_nights, 0)),
        row(format!("Gross Revenue ({CURRENCY})"), &|c| {
            format_number(c.gross_revenue, 0)
        }),
        row("NOI".into(), &|c| format_number(c.net_operating_income, 0)),
        row(format!("Annual Mortgage Interest ({CURRENCY})"), &|c| {
            format_number(c.annual_interest, 0)
        }),
        row(format!("Annual Cash Flow ({CURRENCY})"), &|c| {
            format_number(c.annual_cash_flow, 0)
        }),
        row("Cash-on-Cash ROI (%)".into(), &|c| format_pct(c.roi_pct, 2)),
        row("Cap Rate (%)".into(), &|c| format_pct(c.cap_rate_pct, 2)),
    ];

    ReportTable {
        title: format!("Detailed Sensitivity for {}", t.label),
        groups,
        header,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use str_invest_core::assumptions::{ApartmentInput, SharedAssumptions};
    use str_invest_core::base_model::base::compute_base;
    use str_invest_core::sensitivity::grid::build_sensitivity;
    use str_invest_core::types::SeasonValues;

    fn sample() -> (ApartmentInput, SharedAssumptions) {
        (
            ApartmentInput {
                label: "2.5 Room".into(),
                size_area: dec!(50),
                season_rates: SeasonValues::new(dec!(100), dec!(150), dec!(250)),
            },
            SharedAssumptions {
                price_per_area: dec!(10000),
                down_payment_pct: dec!(20),
                interest_rate_pct: dec!(3),
                season_durations: SeasonValues::new(dec!(200), dec!(100), dec!(65)),
                season_occupancy: SeasonValues::new(dec!(0.4), dec!(0.5), dec!(0.7)),
                base_expense_rate: dec!(0.25),
            },
        )
    }

    #[test]
    fn test_base_table_layout() {
        let (apt, a) = sample();
        let base = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        let table = base_table(&[base], Some(dec!(0.25)));
        assert_eq!(table.title, "Base Model Results (User Expense Rate: 25%)");
        assert_eq!(table.header, vec!["Parameter", "2.5 Room"]);
        assert_eq!(table.rows[1], vec!["Purchase Price (CHF)", "500,000"]);
        assert_eq!(table.rows[9], vec!["Cash-on-Cash ROI (%)", "8.16%"]);
        assert_eq!(table.rows[10], vec!["Cap Rate (%)", "4.03%"]);
    }

    #[test]
    fn test_sensitivity_table_has_nine_value_columns() {
        let (apt, a) = sample();
        let base = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        let grid = build_sensitivity(&apt, &base, &a, &mut Vec::new()).unwrap();
        let table = sensitivity_table(&grid);

        assert_eq!(table.header.len(), 10);
        assert!(table.rows.iter().all(|r| r.len() == 10));
        assert_eq!(table.groups[0], ("20% OE → NOI = 80% of Gross".to_string(), 3));
        assert_eq!(table.header[1], "20% OE / Pessimistic (50%)");
        // booked nights at 50% of 365
        assert_eq!(table.rows[1][1], "183");
    }
}
