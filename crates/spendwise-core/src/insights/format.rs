//! Rounding and amount formatting shared by the insight stages
//!
//! Every rounding in the pipeline uses round-half-to-even, so 49.5 rounds to
//! 50 and 50.5 rounds to 50.

/// Round to the nearest integer, ties to even
pub fn round_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Round to one decimal place, ties to even
pub fn round_even_1dp(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Share of `part` in `whole` as a rounded percentage
///
/// Multiplies before dividing so exact halves (99 of 200) stay exact.
/// Returns `None` when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> Option<i64> {
    if whole > 0.0 {
        Some(round_even(part * 100.0 / whole))
    } else {
        None
    }
}

/// Format an amount with the currency prefix
///
/// Whole amounts print without decimals, anything else with two.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}{:.0}", symbol, amount)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}
