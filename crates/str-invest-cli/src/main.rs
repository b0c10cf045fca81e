mod commands;
mod input;
mod output;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::apartment::ApartmentArgs;
use commands::model::ModelArgs;
use commands::seasonal::SeasonalRevenueArgs;

/// Short-term-rental apartment investment calculations
#[derive(Parser)]
#[command(
    name = "strinv",
    version,
    about = "Short-term-rental apartment investment calculations",
    long_about = "A CLI for evaluating apartment purchases run as short-term rentals, \
                  with decimal precision. Computes purchase financing, seasonal revenue, \
                  NOI, cash flow, cash-on-cash ROI and cap rate, plus a 3x3 sensitivity \
                  grid over operating-expense rates and occupancy scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full model: base, season breakdown and sensitivity per apartment
    Model(ModelArgs),
    /// Base-case financing and profitability for one apartment
    Base(ApartmentArgs),
    /// Season-by-season revenue breakdown for one apartment
    Breakdown(ApartmentArgs),
    /// Expense-rate x occupancy sensitivity grid for one apartment
    Sensitivity(ApartmentArgs),
    /// Revenue of a single season (days x occupancy x ADR)
    SeasonalRevenue(SeasonalRevenueArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Html,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Model(args) => commands::model::run_model(args),
        Commands::Base(args) => commands::apartment::run_base(args),
        Commands::Breakdown(args) => commands::apartment::run_breakdown(args),
        Commands::Sensitivity(args) => commands::apartment::run_sensitivity(args),
        Commands::SeasonalRevenue(args) => commands::seasonal::run_seasonal_revenue(args),
        Commands::Version => {
            println!("strinv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
