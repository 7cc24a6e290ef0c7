//! Forecaster: next month's spend from the last two months' growth

use serde::Serialize;

use crate::models::Direction;

use super::aggregate::{MonthlyTotals, YearMonth};
use super::format::{format_amount, round_even};

/// Projection of next month's spending
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_month_estimate: i64,
    pub trend: Direction,
    pub message: String,
    /// Month the projection starts from
    #[serde(skip)]
    pub based_on: YearMonth,
    #[serde(skip)]
    pub growth_rate: f64,
}

/// Extrapolate from the two most recent months present
///
/// Needs at least two distinct months. A zero previous month forces the
/// growth rate to 0.
pub fn forecast_next_month(monthly: &MonthlyTotals, currency_symbol: &str) -> Option<Forecast> {
    let mut newest_first = monthly.iter().rev();
    let (&last_month, &last) = newest_first.next()?;
    let (_, &prev) = newest_first.next()?;

    let growth_rate = if prev > 0.0 { (last - prev) / prev } else { 0.0 };
    let estimate = round_even(last * (1.0 + growth_rate));
    let trend = if growth_rate > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    tracing::debug!(
        month = %last_month,
        last,
        prev,
        growth_rate,
        estimate,
        "Forecast next month"
    );

    Some(Forecast {
        next_month_estimate: estimate,
        trend,
        message: format!(
            "If you continue this trend, you may spend around {} next month.",
            format_amount(currency_symbol, estimate as f64)
        ),
        based_on: last_month,
        growth_rate,
    })
}
