//! Human-readable renderings of leaderboard figures.

use leaderboard_core::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};

/// Insert `,` between groups of three digits of an unsigned integer string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `value` rounded to `dp` decimal places with thousands separators.
fn grouped(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').map_or((text.as_str(), None), |(i, f)| (i, Some(f)));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{}.{frac}", group_digits(int_part)),
        None => format!("{sign}{}", group_digits(int_part)),
    }
}

/// `1234` -> `"1,234"`.
#[must_use]
pub fn count(n: usize) -> String {
    group_digits(&n.to_string())
}

/// `(1234.5, DOP)` -> `"DOP 1,234.50"`.
#[must_use]
pub fn money(amount: Decimal, currency: &CurrencyCode) -> String {
    format!("{currency} {}", grouped(amount, 2))
}

/// Performance score: normalized revenue rounded to whole points.
#[must_use]
pub fn points(revenue: Decimal) -> String {
    format!("{} pts", grouped(revenue, 0))
}

/// Growth badge with an explicit sign, one decimal place.
#[must_use]
pub fn growth_badge(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}%", grouped(rounded, 1))
    } else {
        format!("+{}%", grouped(rounded, 1))
    }
}

/// Quote a CSV field, doubling embedded quotes.
#[must_use]
pub fn csv_quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
