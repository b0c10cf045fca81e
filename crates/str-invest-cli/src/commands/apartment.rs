use clap::Args;
use serde_json::Value;

use str_invest_core::assumptions::ApartmentModelInput;
use str_invest_core::base_model::base;
use str_invest_core::seasonal::breakdown;
use str_invest_core::sensitivity::grid;

use crate::input;

/// Arguments for single-apartment calculations
#[derive(Args)]
pub struct ApartmentArgs {
    /// Path to JSON or YAML input file (assumptions + apartment)
    #[arg(long)]
    pub input: Option<String>,
}

fn read_apartment_input(
    args: &ApartmentArgs,
    what: &str,
) -> Result<ApartmentModelInput, Box<dyn std::error::Error>> {
    input::stdin::read_file_or_stdin(args.input.as_deref(), what)
}

pub fn run_base(args: ApartmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let apt_input = read_apartment_input(&args, "the base model")?;
    let result = base::calculate_base_model(&apt_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_breakdown(args: ApartmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let apt_input = read_apartment_input(&args, "the season breakdown")?;
    let result = breakdown::calculate_season_breakdown(&apt_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: ApartmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let apt_input = read_apartment_input(&args, "the sensitivity grid")?;
    let result = grid::calculate_sensitivity(&apt_input)?;
    Ok(serde_json::to_value(result)?)
}
