use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Days, Money, Rate, SeasonValues};

/// Labels of the three apartment types the model is normally run for.
pub const STANDARD_APARTMENT_LABELS: [&str; 3] = ["2.5 Room", "3.5 Room", "4.5 Room"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Market, financing and seasonal assumptions shared by every apartment in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedAssumptions {
    /// Purchase price per square metre
    pub price_per_area: Money,
    /// Down payment as a percentage of purchase price (0-100)
    pub down_payment_pct: Decimal,
    /// Annual mortgage interest rate as a percentage (0-100)
    pub interest_rate_pct: Decimal,
    /// Length of each season in days (need not sum to 365)
    pub season_durations: SeasonValues<Days>,
    /// Base-case occupancy per season (0-1)
    pub season_occupancy: SeasonValues<Rate>,
    /// Operating-expense fraction used by the base model only (0-1)
    pub base_expense_rate: Rate,
}

/// One apartment type: its floor area and nightly rate per season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentInput {
    pub label: String,
    /// Floor area in square metres
    pub size_area: Decimal,
    /// Average daily rate per season
    pub season_rates: SeasonValues<Money>,
}

/// Input for the single-apartment calculations (base model, season
/// breakdown, sensitivity grid).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentModelInput {
    pub assumptions: SharedAssumptions,
    pub apartment: ApartmentInput,
}

// ---------------------------------------------------------------------------
// Input checks
// ---------------------------------------------------------------------------

// Inputs are trusted: nothing here rejects a value, out-of-range figures are
// flagged and the arithmetic proceeds on them unchanged.

/// Flag shared assumptions that fall outside their usual ranges.
pub fn check_assumptions(a: &SharedAssumptions, warnings: &mut Vec<String>) {
    if a.price_per_area < Decimal::ZERO {
        warnings.push(format!("Price per area {} is negative", a.price_per_area));
    }
    if a.down_payment_pct < Decimal::ZERO || a.down_payment_pct > dec!(100) {
        warnings.push(format!(
            "Down payment {}% is outside 0-100%",
            a.down_payment_pct
        ));
    }
    if a.interest_rate_pct < Decimal::ZERO || a.interest_rate_pct > dec!(100) {
        warnings.push(format!(
            "Interest rate {}% is outside 0-100%",
            a.interest_rate_pct
        ));
    }
    if a.base_expense_rate < Decimal::ZERO || a.base_expense_rate > Decimal::ONE {
        warnings.push(format!(
            "Base expense rate {} is outside [0, 1]",
            a.base_expense_rate
        ));
    }
    for (season, days) in a.season_durations.iter() {
        if days < Decimal::ZERO {
            warnings.push(format!("{} duration {days} days is negative", season.label()));
        }
    }
    for (season, occ) in a.season_occupancy.iter() {
        if occ < Decimal::ZERO || occ > Decimal::ONE {
            warnings.push(format!(
                "{} occupancy {occ} is outside [0, 1]",
                season.label()
            ));
        }
    }
}

/// Flag apartment figures that fall outside their usual ranges.
pub fn check_apartment(apt: &ApartmentInput, warnings: &mut Vec<String>) {
    if apt.size_area < Decimal::ZERO {
        warnings.push(format!("{}: size {} m² is negative", apt.label, apt.size_area));
    }
    for (season, rate) in apt.season_rates.iter() {
        if rate < Decimal::ZERO {
            warnings.push(format!(
                "{}: {} rate {rate} is negative",
                apt.label,
                season.label()
            ));
        }
    }
}
