//! Aggregator: folds expenses into category, day and month buckets

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::Expense;

/// Calendar month key, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    /// Parse a `YYYY-MM` key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month (use YYYY-MM): {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month number in month: {}", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month out of range (1-12): {}", s));
        }
        Ok(Self::new(year, month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Category totals that remember first-seen order
#[derive(Debug, Clone, Default)]
pub struct CategoryTotals {
    order: Vec<String>,
    totals: HashMap<String, f64>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, registering it on first sight
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.totals.get_mut(category) {
            Some(total) => *total += amount,
            None => {
                self.order.push(category.to_string());
                self.totals.insert(category.to_string(), amount);
            }
        }
    }

    /// Total for a category, zero when the category never appeared
    pub fn get_or_zero(&self, category: &str) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    /// Iterate `(category, total)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.order
            .iter()
            .map(move |c| (c.as_str(), self.get_or_zero(c)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.totals.values().sum()
    }
}

/// UTC calendar day → total
pub type DailyTotals = BTreeMap<NaiveDate, f64>;

/// UTC year-month → total
pub type MonthlyTotals = BTreeMap<YearMonth, f64>;

/// Everything the downstream stages read from the raw expenses
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub grand_total: f64,
    pub categories: CategoryTotals,
    pub daily: DailyTotals,
    pub monthly: MonthlyTotals,
}

/// Fold expenses into totals, bucketing days and months in UTC
pub fn aggregate(expenses: &[Expense]) -> Aggregates {
    let aggregates = expenses
        .iter()
        .fold(Aggregates::default(), |mut acc, expense| {
            let day = expense.utc().date_naive();

            acc.grand_total += expense.amount;
            acc.categories.add(&expense.category, expense.amount);
            *acc.daily.entry(day).or_insert(0.0) += expense.amount;
            *acc.monthly.entry(YearMonth::of(day)).or_insert(0.0) += expense.amount;
            acc
        });

    tracing::debug!(
        expenses = expenses.len(),
        categories = aggregates.categories.len(),
        days = aggregates.daily.len(),
        months = aggregates.monthly.len(),
        total = aggregates.grand_total,
        "Aggregated expenses"
    );

    aggregates
}
