use clap::Args;
use serde_json::Value;
use tracing::debug;

use str_invest_core::model::run::{self, InvestmentModelInput};

use crate::input;

/// Arguments for a full model run
#[derive(Args)]
pub struct ModelArgs {
    /// Path to JSON or YAML input file (assumptions + apartments)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_model(args: ModelArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let model_input: InvestmentModelInput =
        input::stdin::read_file_or_stdin(args.input.as_deref(), "the investment model")?;
    debug!(apartments = model_input.apartments.len(), "model input loaded");
    let result = run::run_investment_model(&model_input)?;
    Ok(serde_json::to_value(result)?)
}
