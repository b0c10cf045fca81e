use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::error::InvestError;
use crate::types::Rate;
use crate::InvestResult;

const HUNDRED: Decimal = dec!(100);

fn overflow(context: &str) -> InvestError {
    InvestError::Overflow {
        context: context.to_string(),
    }
}

/// Convert a percentage (0-100) into a fraction (0-1).
pub fn pct_to_rate(pct: Decimal) -> Rate {
    pct / HUNDRED
}

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

// Inputs are not range-checked, so every product and sum in the engine goes
// through these instead of the panicking operators.

pub fn mul(a: Decimal, b: Decimal, context: &str) -> InvestResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

pub fn add(a: Decimal, b: Decimal, context: &str) -> InvestResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

pub fn sub(a: Decimal, b: Decimal, context: &str) -> InvestResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(context))
}

/// Checked sum of an iterator of decimals.
pub fn sum<I>(values: I, context: &str) -> InvestResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, v, context))
}

/// `numerator / denominator`, failing on a zero denominator or overflow.
pub fn divide(numerator: Decimal, denominator: Decimal, context: &str) -> InvestResult<Decimal> {
    if denominator.is_zero() {
        return Err(InvestError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// `numerator / denominator` where a zero denominator is reported rather than
/// raised: the metric becomes `None` and the reason is pushed onto `warnings`.
/// Overflow is still an error.
pub fn ratio_or_warn(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
    warnings: &mut Vec<String>,
) -> InvestResult<Option<Decimal>> {
    match divide(numerator, denominator, context) {
        Ok(v) => Ok(Some(v)),
        Err(e @ InvestError::DivisionByZero { .. }) => {
            warn!(%context, "metric undefined: zero denominator");
            warnings.push(format!("{e}; metric reported as undefined"));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Same as [`ratio_or_warn`], scaled to a percentage.
pub fn pct_or_warn(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
    warnings: &mut Vec<String>,
) -> InvestResult<Option<Decimal>> {
    ratio_or_warn(numerator, denominator, context, warnings)?
        .map(|r| mul(r, HUNDRED, context))
        .transpose()
}
