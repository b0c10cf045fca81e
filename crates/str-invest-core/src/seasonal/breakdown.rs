use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::assumptions::{
    check_apartment, check_assumptions, ApartmentInput, ApartmentModelInput, SharedAssumptions,
};
use crate::ratios::{mul, ratio_or_warn, sum};
use crate::seasonal::revenue::{booked_nights, seasonal_revenue};
use crate::types::{with_metadata, ComputationOutput, Days, Money, Rate, Season};
use crate::InvestResult;

/// Fixed operating-expense fraction used for the breakdown's NOI line.
pub const REFERENCE_EXPENSE_RATE: Rate = dec!(0.25);

/// One season's row of the breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonLine {
    pub season: Season,
    pub days: Days,
    pub occupancy: Rate,
    pub rate: Money,
    pub booked_nights: Days,
    pub gross_revenue: Money,
}

/// Season-by-season revenue for one apartment at base-case occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonBreakdown {
    pub label: String,
    pub size_area: Decimal,
    /// Rows in low, shoulder, peak order
    pub seasons: Vec<SeasonLine>,
    pub total_booked_nights: Days,
    pub total_gross_revenue: Money,
    /// Total gross / total booked nights; `None` when nothing is booked
    pub adr_per_booked_night: Option<Money>,
    /// Total gross at [`REFERENCE_EXPENSE_RATE`]
    pub noi_at_reference_expense: Money,
}

pub fn build_season_breakdown(
    apartment: &ApartmentInput,
    assumptions: &SharedAssumptions,
    warnings: &mut Vec<String>,
) -> InvestResult<SeasonBreakdown> {
    let seasons = Season::ALL
        .iter()
        .map(|&season| {
            let days = assumptions.season_durations.get(season);
            let occupancy = assumptions.season_occupancy.get(season);
            let rate = apartment.season_rates.get(season);
            Ok(SeasonLine {
                season,
                days,
                occupancy,
                rate,
                booked_nights: booked_nights(days, occupancy)?,
                gross_revenue: seasonal_revenue(rate, days, occupancy)?,
            })
        })
        .collect::<InvestResult<Vec<SeasonLine>>>()?;

    let total_booked_nights: Days = sum(
        seasons.iter().map(|l| l.booked_nights),
        "total booked nights",
    )?;
    let total_gross_revenue: Money =
        sum(seasons.iter().map(|l| l.gross_revenue), "total gross revenue")?;

    let adr_per_booked_night = ratio_or_warn(
        total_gross_revenue,
        total_booked_nights,
        &format!("{} ADR per booked night (total booked nights)", apartment.label),
        warnings,
    )?;
    let noi_at_reference_expense = mul(
        total_gross_revenue,
        Decimal::ONE - REFERENCE_EXPENSE_RATE,
        "NOI at reference expense",
    )?;

    Ok(SeasonBreakdown {
        label: apartment.label.clone(),
        size_area: apartment.size_area,
        seasons,
        total_booked_nights,
        total_gross_revenue,
        adr_per_booked_night,
        noi_at_reference_expense,
    })
}

/// Season breakdown for a single apartment, wrapped in the computation envelope.
pub fn calculate_season_breakdown(
    input: &ApartmentModelInput,
) -> InvestResult<ComputationOutput<SeasonBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    check_assumptions(&input.assumptions, &mut warnings);
    check_apartment(&input.apartment, &mut warnings);

    let output = build_season_breakdown(&input.apartment, &input.assumptions, &mut warnings)?;
    debug!(
        apartment = %output.label,
        gross = %output.total_gross_revenue,
        "season breakdown computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Season Breakdown (base-case occupancy, 25% reference expense)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
