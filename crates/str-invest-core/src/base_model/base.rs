use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::assumptions::{
    check_apartment, check_assumptions, ApartmentInput, ApartmentModelInput, SharedAssumptions,
};
use crate::ratios::{mul, pct_or_warn, pct_to_rate, sub};
use crate::seasonal::revenue::{gross_revenue, weighted_average_adr};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::InvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Purchase and financing figures for one apartment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    /// size * price per area
    pub purchase_price: Money,
    /// purchase price * down payment %
    pub down_payment: Money,
    /// purchase price - down payment
    pub financed_amount: Money,
}

/// Base-case profitability of one apartment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResult {
    pub label: String,
    pub size_area: Decimal,
    pub purchase_price: Money,
    pub down_payment: Money,
    pub financed_amount: Money,
    /// Day-weighted mean nightly rate; `None` when the seasons total zero days
    pub weighted_average_adr: Option<Money>,
    /// Revenue at per-season base-case occupancy
    pub gross_revenue: Money,
    pub net_operating_income: Money,
    pub annual_interest: Money,
    pub annual_cash_flow: Money,
    /// Cash flow / down payment, in percent; `None` with no down payment
    pub cash_on_cash_pct: Option<Decimal>,
    /// NOI / purchase price, in percent; `None` with a zero purchase price
    pub cap_rate_pct: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

pub fn compute_financing(
    size_area: Decimal,
    assumptions: &SharedAssumptions,
) -> InvestResult<Financing> {
    let purchase_price = mul(
        size_area,
        assumptions.price_per_area,
        "purchase price (size x price per area)",
    )?;
    let down_payment = mul(
        purchase_price,
        pct_to_rate(assumptions.down_payment_pct),
        "down payment",
    )?;
    Ok(Financing {
        purchase_price,
        down_payment,
        financed_amount: sub(purchase_price, down_payment, "financed amount")?,
    })
}

/// Interest-only annual mortgage cost on the financed amount.
pub fn annual_interest(
    financed_amount: Money,
    assumptions: &SharedAssumptions,
) -> InvestResult<Money> {
    mul(
        financed_amount,
        pct_to_rate(assumptions.interest_rate_pct),
        "annual interest",
    )
}

/// Base-case metrics for one apartment.
///
/// Pure: the same inputs always give the same result. Zero denominators
/// leave the affected ratio as `None` and push a warning; results that do
/// not fit in a `Decimal` fail with [`InvestError::Overflow`].
///
/// [`InvestError::Overflow`]: crate::InvestError::Overflow
pub fn compute_base(
    apartment: &ApartmentInput,
    assumptions: &SharedAssumptions,
    warnings: &mut Vec<String>,
) -> InvestResult<BaseResult> {
    let financing = compute_financing(apartment.size_area, assumptions)?;

    let weighted_average_adr = weighted_average_adr(
        &apartment.season_rates,
        &assumptions.season_durations,
        warnings,
    )?;

    let gross_revenue = gross_revenue(
        &apartment.season_rates,
        &assumptions.season_durations,
        &assumptions.season_occupancy,
    )?;
    let net_operating_income = mul(
        gross_revenue,
        sub(Decimal::ONE, assumptions.base_expense_rate, "expense rate")?,
        "net operating income",
    )?;
    let annual_interest = annual_interest(financing.financed_amount, assumptions)?;
    let annual_cash_flow = sub(net_operating_income, annual_interest, "annual cash flow")?;

    let cash_on_cash_pct = pct_or_warn(
        annual_cash_flow,
        financing.down_payment,
        &format!("{} cash-on-cash ROI (down payment)", apartment.label),
        warnings,
    )?;
    let cap_rate_pct = pct_or_warn(
        net_operating_income,
        financing.purchase_price,
        &format!("{} cap rate (purchase price)", apartment.label),
        warnings,
    )?;

    Ok(BaseResult {
        label: apartment.label.clone(),
        size_area: apartment.size_area,
        purchase_price: financing.purchase_price,
        down_payment: financing.down_payment,
        financed_amount: financing.financed_amount,
        weighted_average_adr,
        gross_revenue,
        net_operating_income,
        annual_interest,
        annual_cash_flow,
        cash_on_cash_pct,
        cap_rate_pct,
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Base model for a single apartment, wrapped in the computation envelope.
pub fn calculate_base_model(
    input: &ApartmentModelInput,
) -> InvestResult<ComputationOutput<BaseResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    check_assumptions(&input.assumptions, &mut warnings);
    check_apartment(&input.apartment, &mut warnings);

    let output = compute_base(&input.apartment, &input.assumptions, &mut warnings)?;
    debug!(
        apartment = %output.label,
        noi = %output.net_operating_income,
        cash_flow = %output.annual_cash_flow,
        "base model computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Base Model (seasonal occupancy, user expense rate, interest-only financing)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SeasonValues;
    use rust_decimal_macros::dec;

    fn sample_assumptions() -> SharedAssumptions {
        SharedAssumptions {
            price_per_area: dec!(10000),
            down_payment_pct: dec!(20),
            interest_rate_pct: dec!(3),
            season_durations: SeasonValues::new(dec!(200), dec!(100), dec!(65)),
            season_occupancy: SeasonValues::new(dec!(0.4), dec!(0.5), dec!(0.7)),
            base_expense_rate: dec!(0.25),
        }
    }

    fn sample_apartment() -> ApartmentInput {
        ApartmentInput {
            label: "2.5 Room".into(),
            size_area: dec!(50),
            season_rates: SeasonValues::new(dec!(100), dec!(150), dec!(250)),
        }
    }

    #[test]
    fn test_financing() {
        let f = compute_financing(dec!(50), &sample_assumptions()).unwrap();
        assert_eq!(f.purchase_price, dec!(500000));
        assert_eq!(f.down_payment, dec!(100000));
        assert_eq!(f.financed_amount, dec!(400000));
    }

    #[test]
    fn test_base_reference_scenario() {
        let mut warnings = Vec::new();
        let r = compute_base(&sample_apartment(), &sample_assumptions(), &mut warnings).unwrap();

        assert_eq!(r.gross_revenue, dec!(26875));
        assert_eq!(r.net_operating_income, dec!(20156.25));
        assert_eq!(r.annual_interest, dec!(12000));
        assert_eq!(r.annual_cash_flow, dec!(8156.25));
        assert_eq!(r.cash_on_cash_pct, Some(dec!(8.15625)));
        assert_eq!(r.cap_rate_pct, Some(dec!(4.03125)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_weighted_adr_uses_days_not_occupancy() {
        let mut warnings = Vec::new();
        let r = compute_base(&sample_apartment(), &sample_assumptions(), &mut warnings).unwrap();
        // (20000 + 15000 + 16250) / 365
        let expected = dec!(51250) / dec!(365);
        assert_eq!(r.weighted_average_adr, Some(expected));
    }

    #[test]
    fn test_all_cash_purchase_roi_equals_cap_rate() {
        let mut a = sample_assumptions();
        a.down_payment_pct = dec!(100);
        let mut warnings = Vec::new();
        let r = compute_base(&sample_apartment(), &a, &mut warnings).unwrap();
        assert_eq!(r.financed_amount, Decimal::ZERO);
        assert_eq!(r.annual_interest, Decimal::ZERO);
        assert_eq!(r.cash_on_cash_pct, r.cap_rate_pct);
    }

    #[test]
    fn test_zero_down_payment_reports_undefined_roi() {
        let mut a = sample_assumptions();
        a.down_payment_pct = Decimal::ZERO;
        let mut warnings = Vec::new();
        let r = compute_base(&sample_apartment(), &a, &mut warnings).unwrap();
        assert_eq!(r.cash_on_cash_pct, None);
        assert!(r.cap_rate_pct.is_some());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("cash-on-cash"));
    }

    #[test]
    fn test_zero_price_reports_both_ratios_undefined() {
        let mut a = sample_assumptions();
        a.price_per_area = Decimal::ZERO;
        let mut warnings = Vec::new();
        let r = compute_base(&sample_apartment(), &a, &mut warnings).unwrap();
        assert_eq!(r.purchase_price, Decimal::ZERO);
        assert_eq!(r.cash_on_cash_pct, None);
        assert_eq!(r.cap_rate_pct, None);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_envelope_collects_input_warnings() {
        let mut input = ApartmentModelInput {
            assumptions: sample_assumptions(),
            apartment: sample_apartment(),
        };
        input.assumptions.base_expense_rate = dec!(1.5);
        let out = calculate_base_model(&input).unwrap();
        // NOI goes negative but is still reported
        assert_eq!(out.result.net_operating_income, dec!(-13437.5));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_huge_price_overflows_instead_of_panicking() {
        let mut a = sample_assumptions();
        a.price_per_area = dec!(10000000000000000000000000000);
        let err = compute_financing(dec!(50), &a).unwrap_err();
        assert!(matches!(err, crate::InvestError::Overflow { .. }));
        assert!(err.to_string().contains("purchase price"));

        let input = ApartmentModelInput {
            assumptions: a,
            apartment: sample_apartment(),
        };
        assert!(calculate_base_model(&input).is_err());
    }
}
