use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use str_invest_core::seasonal::revenue::{self, SeasonalRevenueInput};

/// Arguments for the single-season revenue calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SeasonalRevenueArgs {
    /// Average daily rate
    #[arg(long)]
    pub rate: Decimal,

    /// Season length in days
    #[arg(long)]
    pub days: Decimal,

    /// Occupancy as a fraction (e.g. 0.65)
    #[arg(long)]
    pub occupancy: Decimal,
}

pub fn run_seasonal_revenue(
    args: SeasonalRevenueArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input = SeasonalRevenueInput {
        rate: args.rate,
        days: args.days,
        occupancy: args.occupancy,
    };
    let result = revenue::calculate_seasonal_revenue(&input)?;
    Ok(serde_json::to_value(result)?)
}
