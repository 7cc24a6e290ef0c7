//! TrendAnalyzer: trailing week vs the week before

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Direction, Expense};

use super::format::round_even;

/// Length of each comparison window
pub const WEEK_DAYS: i64 = 7;

/// Week-over-week spending change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTrend {
    /// Absolute rounded difference between the two weeks
    pub change: i64,
    pub direction: Direction,
}

/// Spending summed per window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeekTotals {
    /// `[now - 7d, now]`
    pub this_week: f64,
    /// `[now - 14d, now - 7d)`
    pub last_week: f64,
}

/// Sum spending into the two windows; anything outside both is ignored
pub fn week_totals(expenses: &[Expense], now: DateTime<Utc>) -> WeekTotals {
    let this_week_start = now - Duration::days(WEEK_DAYS);
    let last_week_start = now - Duration::days(WEEK_DAYS * 2);

    expenses
        .iter()
        .fold(WeekTotals::default(), |mut totals, expense| {
            let at = expense.utc();
            if at >= this_week_start && at <= now {
                totals.this_week += expense.amount;
            } else if at >= last_week_start && at < this_week_start {
                totals.last_week += expense.amount;
            }
            totals
        })
}

/// Compare the trailing week against the previous one
///
/// Absent when the previous week had no spending: that means there is not
/// enough history, not that nothing changed.
pub fn weekly_trend(expenses: &[Expense], now: DateTime<Utc>) -> Option<WeeklyTrend> {
    let totals = week_totals(expenses, now);

    tracing::debug!(
        this_week = totals.this_week,
        last_week = totals.last_week,
        "Computed weekly windows"
    );

    if totals.last_week <= 0.0 {
        return None;
    }

    let direction = if totals.this_week > totals.last_week {
        Direction::Up
    } else {
        Direction::Down
    };

    Some(WeeklyTrend {
        change: round_even(totals.this_week - totals.last_week).abs(),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn expense_at(amount: f64, at: DateTime<Utc>) -> Expense {
        Expense::new("Food", amount, at.fixed_offset())
    }

    #[test]
    fn test_spending_went_down() {
        let expenses = vec![
            expense_at(100.0, now() - Duration::days(3)),
            expense_at(200.0, now() - Duration::days(10)),
        ];
        let trend = weekly_trend(&expenses, now()).unwrap();
        assert_eq!(trend.change, 100);
        assert_eq!(trend.direction, Direction::Down);
    }

    #[test]
    fn test_spending_went_up() {
        let expenses = vec![
            expense_at(350.4, now() - Duration::days(1)),
            expense_at(100.0, now() - Duration::days(8)),
        ];
        let trend = weekly_trend(&expenses, now()).unwrap();
        assert_eq!(trend.change, 250);
        assert_eq!(trend.direction, Direction::Up);
    }

    #[test]
    fn test_no_previous_week_means_absent() {
        let expenses = vec![expense_at(100.0, now() - Duration::days(2))];
        assert!(weekly_trend(&expenses, now()).is_none());
    }

    #[test]
    fn test_equal_weeks_report_down_with_zero_change() {
        let expenses = vec![
            expense_at(50.0, now() - Duration::days(2)),
            expense_at(50.0, now() - Duration::days(9)),
        ];
        let trend = weekly_trend(&expenses, now()).unwrap();
        assert_eq!(trend.change, 0);
        assert_eq!(trend.direction, Direction::Down);
    }

    #[test]
    fn test_window_boundaries() {
        let expenses = vec![
            // exactly now - 7d belongs to this week
            expense_at(10.0, now() - Duration::days(7)),
            // exactly now - 14d belongs to last week
            expense_at(20.0, now() - Duration::days(14)),
            // older than two weeks is ignored
            expense_at(40.0, now() - Duration::days(14) - Duration::seconds(1)),
            // future expenses are outside both windows
            expense_at(80.0, now() + Duration::hours(1)),
        ];
        let totals = week_totals(&expenses, now());
        assert_eq!(totals.this_week, 10.0);
        assert_eq!(totals.last_week, 20.0);
    }

    #[test]
    fn test_offsets_are_normalized() {
        // 2024-06-08T13:00 at +02:00 is 11:00 UTC, just before the this-week start
        let date = chrono::DateTime::parse_from_rfc3339("2024-06-08T13:00:00+02:00").unwrap();
        let expenses = vec![Expense::new("Food", 30.0, date)];
        let totals = week_totals(&expenses, now());
        assert_eq!(totals.this_week, 0.0);
        assert_eq!(totals.last_week, 30.0);
    }
}
