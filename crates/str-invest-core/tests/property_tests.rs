//! Property-based tests for the investment engine.
//!
//! Decimals are generated from integer mantissas so every case is exact.

use proptest::prelude::*;
use rust_decimal::Decimal;
use str_invest_core::assumptions::{ApartmentInput, SharedAssumptions};
use str_invest_core::base_model::base::compute_base;
use str_invest_core::seasonal::revenue::seasonal_revenue;
use str_invest_core::sensitivity::grid::build_sensitivity;
use str_invest_core::types::SeasonValues;
use str_invest_core::InvestError;

// =============================================================================
// Generators
// =============================================================================

/// Amount with two decimal places in [0, max).
fn arb_amount(max_cents: i64) -> impl Strategy<Value = Decimal> + Clone {
    (0i64..max_cents).prop_map(|n| Decimal::new(n, 2))
}

/// Fraction with two decimal places; may fall outside [0, 1].
fn arb_fraction() -> impl Strategy<Value = Decimal> + Clone {
    (-20i64..=120).prop_map(|n| Decimal::new(n, 2))
}

fn arb_seasons<S>(s: S) -> impl Strategy<Value = SeasonValues<Decimal>>
where
    S: Strategy<Value = Decimal> + Clone,
{
    (s.clone(), s.clone(), s).prop_map(|(l, m, p)| SeasonValues::new(l, m, p))
}

fn arb_assumptions() -> impl Strategy<Value = SharedAssumptions> {
    (
        arb_amount(5_000_000),
        (0i64..=100).prop_map(Decimal::from),
        arb_amount(1_000),
        arb_seasons((0i64..=365).prop_map(Decimal::from)),
        arb_seasons(arb_fraction()),
        arb_fraction(),
    )
        .prop_map(
            |(price, down, interest, durations, occupancy, expense)| SharedAssumptions {
                price_per_area: price,
                down_payment_pct: down,
                interest_rate_pct: interest,
                season_durations: durations,
                season_occupancy: occupancy,
                base_expense_rate: expense,
            },
        )
}

/// Whole numbers spread over most of the `Decimal` range.
fn arb_unbounded() -> impl Strategy<Value = Decimal> + Clone {
    (-(1i128 << 95)..(1i128 << 95)).prop_map(|n| Decimal::from_i128_with_scale(n, 0))
}

fn arb_apartment() -> impl Strategy<Value = ApartmentInput> {
    (arb_amount(30_000), arb_seasons(arb_amount(100_000))).prop_map(|(size, rates)| {
        ApartmentInput {
            label: "3.5 Room".into(),
            size_area: size,
            season_rates: rates,
        }
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn seasonal_revenue_is_days_times_occupancy_times_rate(
        rate in arb_amount(100_000),
        days in (0i64..=365).prop_map(Decimal::from),
        occ in arb_fraction(),
    ) {
        prop_assert_eq!(seasonal_revenue(rate, days, occ).unwrap(), days * occ * rate);
        prop_assert_eq!(seasonal_revenue(rate, Decimal::ZERO, occ).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn financed_amount_is_price_minus_down_payment(
        apt in arb_apartment(),
        a in arb_assumptions(),
    ) {
        let r = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        prop_assert_eq!(r.financed_amount, r.purchase_price - r.down_payment);
    }

    #[test]
    fn grid_and_base_agree_on_adr_and_interest(
        apt in arb_apartment(),
        a in arb_assumptions(),
    ) {
        let mut warnings = Vec::new();
        let base = compute_base(&apt, &a, &mut warnings).unwrap();
        let table = build_sensitivity(&apt, &base, &a, &mut warnings).unwrap();

        prop_assert_eq!(base.weighted_average_adr, table.weighted_average_adr);
        prop_assert_eq!(table.cells().count(), 9);
        for cell in table.cells() {
            prop_assert_eq!(cell.annual_interest, base.annual_interest);
        }
        let mid = table.cell(1, 1).unwrap();
        prop_assert_eq!(mid.net_operating_income, mid.gross_revenue * Decimal::new(75, 2));
    }

    #[test]
    fn ratios_are_undefined_exactly_when_denominator_is_zero(
        apt in arb_apartment(),
        a in arb_assumptions(),
    ) {
        let r = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        prop_assert_eq!(r.cash_on_cash_pct.is_none(), r.down_payment.is_zero());
        prop_assert_eq!(r.cap_rate_pct.is_none(), r.purchase_price.is_zero());
        prop_assert_eq!(
            r.weighted_average_adr.is_none(),
            a.season_durations.total().unwrap().is_zero()
        );
    }

    #[test]
    fn base_model_is_deterministic(apt in arb_apartment(), a in arb_assumptions()) {
        let first = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        let second = compute_base(&apt, &a, &mut Vec::new()).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn extreme_prices_fail_cleanly_instead_of_panicking(
        apt in arb_apartment(),
        a in arb_assumptions(),
        price in arb_unbounded(),
    ) {
        let a = SharedAssumptions { price_per_area: price, ..a };
        let mut warnings = Vec::new();
        match compute_base(&apt, &a, &mut warnings) {
            Ok(base) => {
                prop_assert!(build_sensitivity(&apt, &base, &a, &mut warnings).is_ok());
            }
            Err(e) => prop_assert!(matches!(e, InvestError::Overflow { .. }), "unexpected error: {:?}", e),
        }
    }
}
