use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fractions expressed as decimals (0.25 = 25%). Fields holding percentages
/// carry a `_pct` suffix instead.
pub type Rate = Decimal;

/// Day counts. Fractional values are allowed (booked nights = days * occupancy).
pub type Days = Decimal;

/// One of the three rental seasons of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Low,
    Shoulder,
    Peak,
}

impl Season {
    /// Fixed evaluation order: low, shoulder, peak.
    pub const ALL: [Season; 3] = [Season::Low, Season::Shoulder, Season::Peak];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Low => "Low Season",
            Season::Shoulder => "Shoulder",
            Season::Peak => "Peak Season",
        }
    }
}

/// A value per season (durations, occupancies, nightly rates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonValues<T> {
    pub low: T,
    pub shoulder: T,
    pub peak: T,
}

impl<T: Copy> SeasonValues<T> {
    pub fn new(low: T, shoulder: T, peak: T) -> Self {
        Self {
            low,
            shoulder,
            peak,
        }
    }

    /// Same value for every season.
    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, season: Season) -> T {
        match season {
            Season::Low => self.low,
            Season::Shoulder => self.shoulder,
            Season::Peak => self.peak,
        }
    }

    /// Iterate `(season, value)` pairs in `Season::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Season, T)> + '_ {
        Season::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

impl SeasonValues<Decimal> {
    /// Sum over the three seasons.
    pub fn total(&self) -> crate::InvestResult<Decimal> {
        crate::ratios::sum([self.low, self.shoulder, self.peak], "season total")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_season_values_iterate_in_fixed_order() {
        let v = SeasonValues::new(dec!(1), dec!(2), dec!(3));
        let seasons: Vec<Season> = v.iter().map(|(s, _)| s).collect();
        assert_eq!(seasons, vec![Season::Low, Season::Shoulder, Season::Peak]);
        assert_eq!(v.total().unwrap(), dec!(6));
    }

    #[test]
    fn test_season_values_deserialize_by_name() {
        let v: SeasonValues<Decimal> =
            serde_json::from_str(r#"{"low":"200","shoulder":"100","peak":"65"}"#).unwrap();
        assert_eq!(v.get(Season::Peak), dec!(65));
    }
}
