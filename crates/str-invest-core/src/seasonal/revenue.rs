use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::ratios::{mul, ratio_or_warn, sum};
use crate::types::{with_metadata, ComputationOutput, Days, Money, Rate, SeasonValues};
use crate::InvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a single-season revenue calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRevenueInput {
    /// Average daily rate for the season
    pub rate: Money,
    /// Season length in days
    pub days: Days,
    /// Occupancy fraction (0-1, not enforced)
    pub occupancy: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRevenueOutput {
    pub booked_nights: Days,
    pub revenue: Money,
}

// ---------------------------------------------------------------------------
// Core arithmetic
// ---------------------------------------------------------------------------

/// Nights sold in a season: `days * occupancy`.
pub fn booked_nights(days: Days, occupancy: Rate) -> InvestResult<Days> {
    mul(days, occupancy, "booked nights (days x occupancy)")
}

/// Revenue of one season: `days * occupancy * rate`.
///
/// No bounds are applied; negative or >1 occupancy propagates arithmetically.
pub fn seasonal_revenue(rate: Money, days: Days, occupancy: Rate) -> InvestResult<Money> {
    mul(
        booked_nights(days, occupancy)?,
        rate,
        "seasonal revenue (booked nights x rate)",
    )
}

/// Sum of [`seasonal_revenue`] across low, shoulder and peak.
pub fn gross_revenue(
    rates: &SeasonValues<Money>,
    durations: &SeasonValues<Days>,
    occupancy: &SeasonValues<Rate>,
) -> InvestResult<Money> {
    let per_season = rates
        .iter()
        .map(|(s, rate)| seasonal_revenue(rate, durations.get(s), occupancy.get(s)))
        .collect::<InvestResult<Vec<_>>>()?;
    sum(per_season, "gross revenue")
}

/// Day-weighted mean nightly rate: `sum(days_s * rate_s) / sum(days_s)`.
///
/// `Ok(None)` (with a warning) when the seasons add up to zero days.
pub fn weighted_average_adr(
    rates: &SeasonValues<Money>,
    durations: &SeasonValues<Days>,
    warnings: &mut Vec<String>,
) -> InvestResult<Option<Money>> {
    let context = "weighted average ADR (total season days)";
    let products = rates
        .iter()
        .map(|(s, r)| mul(durations.get(s), r, context))
        .collect::<InvestResult<Vec<_>>>()?;
    let weighted = sum(products, context)?;
    ratio_or_warn(weighted, durations.total()?, context, warnings)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standalone single-season revenue calculator.
pub fn calculate_seasonal_revenue(
    input: &SeasonalRevenueInput,
) -> InvestResult<ComputationOutput<SeasonalRevenueOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.occupancy < Decimal::ZERO || input.occupancy > Decimal::ONE {
        warnings.push(format!("Occupancy {} is outside [0, 1]", input.occupancy));
    }
    if input.days < Decimal::ZERO {
        warnings.push(format!("Season length {} days is negative", input.days));
    }

    let output = SeasonalRevenueOutput {
        booked_nights: booked_nights(input.days, input.occupancy)?,
        revenue: seasonal_revenue(input.rate, input.days, input.occupancy)?,
    };
    debug!(revenue = %output.revenue, "seasonal revenue computed");

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Seasonal Revenue (days x occupancy x ADR)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
