use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::assumptions::{
    check_apartment, check_assumptions, ApartmentInput, ApartmentModelInput, SharedAssumptions,
};
use crate::base_model::base::{annual_interest, compute_base, BaseResult};
use crate::ratios::{mul, pct_or_warn, sub};
use crate::seasonal::revenue::{booked_nights, gross_revenue, weighted_average_adr};
use crate::types::{with_metadata, ComputationOutput, Days, Money, Rate, SeasonValues};
use crate::InvestResult;

/// Operating-expense fractions swept by the grid (rows).
pub const EXPENSE_RATES: [Rate; 3] = [dec!(0.20), dec!(0.25), dec!(0.30)];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Named occupancy level swept by the grid (columns). The level applies
/// uniformly to every season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyScenario {
    Pessimistic,
    Base,
    Optimistic,
}

impl OccupancyScenario {
    pub const ALL: [OccupancyScenario; 3] = [
        OccupancyScenario::Pessimistic,
        OccupancyScenario::Base,
        OccupancyScenario::Optimistic,
    ];

    pub fn occupancy(&self) -> Rate {
        match self {
            OccupancyScenario::Pessimistic => dec!(0.50),
            OccupancyScenario::Base => dec!(0.60),
            OccupancyScenario::Optimistic => dec!(0.70),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OccupancyScenario::Pessimistic => "Pessimistic (50%)",
            OccupancyScenario::Base => "Base (60%)",
            OccupancyScenario::Optimistic => "Optimistic (70%)",
        }
    }
}

/// Metrics for one (expense rate, occupancy scenario) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub expense_rate: Rate,
    pub scenario: OccupancyScenario,
    pub occupancy: Rate,
    /// Total season days * occupancy
    pub booked_nights: Days,
    pub gross_revenue: Money,
    pub net_operating_income: Money,
    /// Same in every cell: financing does not vary by scenario
    pub annual_interest: Money,
    pub annual_cash_flow: Money,
    /// Cash flow / down payment, in percent
    pub roi_pct: Option<Decimal>,
    /// NOI / purchase price, in percent
    pub cap_rate_pct: Option<Decimal>,
}

/// 3x3 sensitivity of one apartment's returns to expenses and occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityTable {
    pub label: String,
    /// Scenario-independent day-weighted ADR, equal to the base model's
    pub weighted_average_adr: Option<Money>,
    pub expense_rates: Vec<Rate>,
    pub occupancy_scenarios: Vec<OccupancyScenario>,
    /// matrix[i][j] = metrics at expense_rates[i], occupancy_scenarios[j]
    pub matrix: Vec<Vec<ScenarioMetrics>>,
    /// Cell closest to the base expense rate at Base occupancy (row, col)
    pub base_case_position: (usize, usize),
}

impl SensitivityTable {
    /// Cell by `(expense rate index, occupancy scenario index)`.
    pub fn cell(&self, expense_idx: usize, scenario_idx: usize) -> Option<&ScenarioMetrics> {
        self.matrix.get(expense_idx)?.get(scenario_idx)
    }

    /// Cells in row-major order: expense rate outer, occupancy inner.
    pub fn cells(&self) -> impl Iterator<Item = &ScenarioMetrics> {
        self.matrix.iter().flatten()
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Find the closest index to a target value.
fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| {
            v.checked_sub(target)
                .map(|d| d.abs())
                .unwrap_or(Decimal::MAX)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn push_unique(warnings: &mut Vec<String>, cell_warnings: Vec<String>) {
    for w in cell_warnings {
        if !warnings.contains(&w) {
            warnings.push(w);
        }
    }
}

/// Recompute one apartment's returns across the fixed expense x occupancy grid.
///
/// Financing figures come from `base`, so `base` must be the result of
/// [`compute_base`] for the same apartment and assumptions.
pub fn build_sensitivity(
    apartment: &ApartmentInput,
    base: &BaseResult,
    assumptions: &SharedAssumptions,
    warnings: &mut Vec<String>,
) -> InvestResult<SensitivityTable> {
    let durations = &assumptions.season_durations;
    let total_days = durations.total()?;
    let interest = annual_interest(base.financed_amount, assumptions)?;

    let mut cell_warnings: Vec<String> = Vec::new();
    let weighted_average_adr =
        weighted_average_adr(&apartment.season_rates, durations, &mut cell_warnings)?;

    let roi_context = format!("{} sensitivity ROI (down payment)", apartment.label);
    let cap_context = format!("{} sensitivity cap rate (purchase price)", apartment.label);

    let mut matrix: Vec<Vec<ScenarioMetrics>> = Vec::with_capacity(EXPENSE_RATES.len());
    for &expense_rate in EXPENSE_RATES.iter() {
        let mut row = Vec::with_capacity(OccupancyScenario::ALL.len());
        for &scenario in OccupancyScenario::ALL.iter() {
            let occupancy = scenario.occupancy();
            let gross = gross_revenue(
                &apartment.season_rates,
                durations,
                &SeasonValues::uniform(occupancy),
            )?;
            let noi = mul(gross, Decimal::ONE - expense_rate, "sensitivity NOI")?;
            let cash_flow = sub(noi, interest, "sensitivity cash flow")?;
            row.push(ScenarioMetrics {
                expense_rate,
                scenario,
                occupancy,
                booked_nights: booked_nights(total_days, occupancy)?,
                gross_revenue: gross,
                net_operating_income: noi,
                annual_interest: interest,
                annual_cash_flow: cash_flow,
                roi_pct: pct_or_warn(
                    cash_flow,
                    base.down_payment,
                    &roi_context,
                    &mut cell_warnings,
                )?,
                cap_rate_pct: pct_or_warn(
                    noi,
                    base.purchase_price,
                    &cap_context,
                    &mut cell_warnings,
                )?,
            });
        }
        matrix.push(row);
    }
    push_unique(warnings, cell_warnings);

    let base_row = closest_index(&EXPENSE_RATES, assumptions.base_expense_rate);
    let base_col = OccupancyScenario::ALL
        .iter()
        .position(|s| *s == OccupancyScenario::Base)
        .unwrap_or(0);

    Ok(SensitivityTable {
        label: apartment.label.clone(),
        weighted_average_adr,
        expense_rates: EXPENSE_RATES.to_vec(),
        occupancy_scenarios: OccupancyScenario::ALL.to_vec(),
        matrix,
        base_case_position: (base_row, base_col),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sensitivity grid for a single apartment. Runs the base model first to
/// obtain the financing figures the grid reuses.
pub fn calculate_sensitivity(
    input: &ApartmentModelInput,
) -> InvestResult<ComputationOutput<SensitivityTable>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    check_assumptions(&input.assumptions, &mut warnings);
    check_apartment(&input.apartment, &mut warnings);

    let base = compute_base(&input.apartment, &input.assumptions, &mut warnings)?;
    let output = build_sensitivity(&input.apartment, &base, &input.assumptions, &mut warnings)?;
    debug!(apartment = %output.label, "sensitivity grid computed");

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Expense x Occupancy Sensitivity (uniform seasonal occupancy)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ApartmentModelInput {
        ApartmentModelInput {
            assumptions: SharedAssumptions {
                price_per_area: dec!(10000),
                down_payment_pct: dec!(20),
                interest_rate_pct: dec!(3),
                season_durations: SeasonValues::new(dec!(200), dec!(100), dec!(65)),
                season_occupancy: SeasonValues::new(dec!(0.4), dec!(0.5), dec!(0.7)),
                base_expense_rate: dec!(0.25),
            },
            apartment: ApartmentInput {
                label: "2.5 Room".into(),
                size_area: dec!(50),
                season_rates: SeasonValues::new(dec!(100), dec!(150), dec!(250)),
            },
        }
    }

    #[test]
    fn test_grid_shape_and_order() {
        let out = calculate_sensitivity(&sample_input()).unwrap().result;
        assert_eq!(out.matrix.len(), 3);
        assert!(out.matrix.iter().all(|row| row.len() == 3));
        assert_eq!(out.cells().count(), 9);

        let first = out.cell(0, 0).unwrap();
        assert_eq!(first.expense_rate, dec!(0.20));
        assert_eq!(first.scenario, OccupancyScenario::Pessimistic);
        let last = out.cell(2, 2).unwrap();
        assert_eq!(last.expense_rate, dec!(0.30));
        assert_eq!(last.scenario, OccupancyScenario::Optimistic);
        assert!(out.cell(3, 0).is_none());
    }

    #[test]
    fn test_pessimistic_low_expense_cell() {
        let out = calculate_sensitivity(&sample_input()).unwrap().result;
        let c = out.cell(0, 0).unwrap();
        // 200*0.5*100 + 100*0.5*150 + 65*0.5*250 = 10000 + 7500 + 8125
        assert_eq!(c.gross_revenue, dec!(25625));
        assert_eq!(c.booked_nights, dec!(182.5));
        assert_eq!(c.net_operating_income, dec!(20500));
        assert_eq!(c.annual_interest, dec!(12000));
        assert_eq!(c.annual_cash_flow, dec!(8500));
        assert_eq!(c.roi_pct, Some(dec!(8.5)));
        assert_eq!(c.cap_rate_pct, Some(dec!(4.1)));
    }

    #[test]
    fn test_base_cell_noi_is_75_percent_of_gross() {
        let out = calculate_sensitivity(&sample_input()).unwrap().result;
        let c = out.cell(1, 1).unwrap();
        assert_eq!(c.expense_rate, dec!(0.25));
        assert_eq!(c.occupancy, dec!(0.60));
        assert_eq!(c.net_operating_income, c.gross_revenue * dec!(0.75));
    }

    #[test]
    fn test_interest_constant_across_cells() {
        let out = calculate_sensitivity(&sample_input()).unwrap().result;
        assert!(out.cells().all(|c| c.annual_interest == dec!(12000)));
    }

    #[test]
    fn test_base_occupancy_is_ignored_by_grid() {
        let mut altered = sample_input();
        altered.assumptions.season_occupancy = SeasonValues::uniform(dec!(0.05));
        let a = calculate_sensitivity(&sample_input()).unwrap().result;
        let b = calculate_sensitivity(&altered).unwrap().result;
        assert_eq!(a.matrix, b.matrix);
    }

    #[test]
    fn test_base_case_position_follows_expense_rate() {
        let out = calculate_sensitivity(&sample_input()).unwrap().result;
        assert_eq!(out.base_case_position, (1, 1));

        let mut input = sample_input();
        input.assumptions.base_expense_rate = dec!(0.35);
        let out = calculate_sensitivity(&input).unwrap().result;
        assert_eq!(out.base_case_position, (2, 1));
    }

    #[test]
    fn test_zero_down_payment_warns_once() {
        let mut input = sample_input();
        input.assumptions.down_payment_pct = Decimal::ZERO;
        let result = calculate_sensitivity(&input).unwrap();
        assert!(result.result.cells().all(|c| c.roi_pct.is_none()));
        // one from the base model, one from the grid
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_huge_rates_overflow_instead_of_panicking() {
        let mut input = sample_input();
        input.apartment.season_rates = SeasonValues::uniform(Decimal::MAX);
        let err = calculate_sensitivity(&input).unwrap_err();
        assert!(matches!(err, crate::InvestError::Overflow { .. }));
    }

    #[test]
    fn test_extreme_expense_rate_still_locates_base_case() {
        assert_eq!(closest_index(&EXPENSE_RATES, dec!(-100000000000000000000)), 0);
        assert_eq!(closest_index(&EXPENSE_RATES, dec!(100000000000000000000)), 2);
        assert!(closest_index(&EXPENSE_RATES, Decimal::MIN) < EXPENSE_RATES.len());
        assert!(closest_index(&EXPENSE_RATES, Decimal::MAX) < EXPENSE_RATES.len());
    }
}
