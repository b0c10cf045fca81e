use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::assumptions::{
    check_apartment, check_assumptions, ApartmentInput, SharedAssumptions,
    STANDARD_APARTMENT_LABELS,
};
use crate::base_model::base::{compute_base, BaseResult};
use crate::error::InvestError;
use crate::seasonal::breakdown::{build_season_breakdown, SeasonBreakdown};
use crate::sensitivity::grid::{build_sensitivity, SensitivityTable};
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::InvestResult;

/// Input for a full model run: shared assumptions plus the apartments to
/// evaluate, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentModelInput {
    pub assumptions: SharedAssumptions,
    pub apartments: Vec<ApartmentInput>,
}

/// Everything computed for one apartment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentReport {
    pub base: BaseResult,
    pub season_breakdown: SeasonBreakdown,
    pub sensitivity: SensitivityTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentModelOutput {
    /// Expense rate the base model was run with
    pub base_expense_rate: Rate,
    /// One report per input apartment, same order
    pub apartments: Vec<ApartmentReport>,
}

/// Run the base model, season breakdown and sensitivity grid for every
/// apartment.
pub fn run_investment_model(
    input: &InvestmentModelInput,
) -> InvestResult<ComputationOutput<InvestmentModelOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.apartments.is_empty() {
        return Err(InvestError::InsufficientData(
            "At least one apartment is required".into(),
        ));
    }

    let labels: Vec<&str> = input.apartments.iter().map(|a| a.label.as_str()).collect();
    if labels != STANDARD_APARTMENT_LABELS {
        warnings.push(format!(
            "Apartment set {labels:?} differs from the standard {STANDARD_APARTMENT_LABELS:?}"
        ));
    }

    check_assumptions(&input.assumptions, &mut warnings);

    let mut apartments = Vec::with_capacity(input.apartments.len());
    for apartment in &input.apartments {
        check_apartment(apartment, &mut warnings);

        let base = compute_base(apartment, &input.assumptions, &mut warnings)?;
        let season_breakdown =
            build_season_breakdown(apartment, &input.assumptions, &mut warnings)?;
        let sensitivity =
            build_sensitivity(apartment, &base, &input.assumptions, &mut warnings)?;
        debug!(apartment = %apartment.label, "apartment evaluated");

        apartments.push(ApartmentReport {
            base,
            season_breakdown,
            sensitivity,
        });
    }

    let output = InvestmentModelOutput {
        base_expense_rate: input.assumptions.base_expense_rate,
        apartments,
    };
    info!(
        apartments = output.apartments.len(),
        warnings = warnings.len(),
        "investment model run complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Short-Term Rental Investment Model (base, season breakdown, sensitivity)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
