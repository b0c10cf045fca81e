use rust_decimal::{Decimal, RoundingStrategy};

/// Format a number with en-US thousands separators and a fixed number of
/// decimals, e.g. `format_number(dec!(1234567.891), 2) == "1,234,567.89"`.
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Like [`format_number`], rendering an undefined metric as "n/a".
pub fn format_opt(value: Option<Decimal>, decimals: u32) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format_number(v, decimals))
}

/// Percentage figure with a trailing `%`.
pub fn format_pct(value: Option<Decimal>, decimals: u32) -> String {
    match value {
        Some(v) => format!("{}%", format_number(v, decimals)),
        None => "n/a".to_string(),
    }
}

/// Fraction (0.25) shown as a whole percentage ("25%"). Fractions too large
/// to scale are shown unscaled.
pub fn format_fraction(value: Decimal) -> String {
    match value.checked_mul(Decimal::ONE_HUNDRED) {
        Some(pct) => format!("{}%", format_number(pct, 0)),
        None => format_number(value, 2),
    }
}
