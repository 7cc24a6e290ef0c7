//! Monthly spending summary
//!
//! A one-month breakdown with a short narrative, built from the same
//! aggregation and top-category stages as the insight report.

use serde::Serialize;

use crate::config::InsightConfig;
use crate::models::Expense;

use super::aggregate::{aggregate, YearMonth};
use super::format::{format_amount, round_even};
use super::top_category::resolve_top_category;

/// Narrative used when nothing was spent in the month
pub const BALANCED_SUMMARY: &str = "Your spending looks balanced this month.";

/// Spending within one category for the month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
}

/// Spending summary for a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub total_spent: f64,
    pub expense_count: usize,
    /// Categories in first-seen order
    pub categories: Vec<CategoryBreakdown>,
    pub summary: String,
}

/// Summarize the expenses whose UTC month is `month`
pub fn summarize_month(
    expenses: &[Expense],
    month: YearMonth,
    config: &InsightConfig,
) -> MonthlySummary {
    let in_month: Vec<Expense> = expenses
        .iter()
        .filter(|e| YearMonth::of(e.utc().date_naive()) == month)
        .cloned()
        .collect();

    let aggregates = aggregate(&in_month);
    let categories = aggregates
        .categories
        .iter()
        .map(|(category, amount)| CategoryBreakdown {
            category: category.to_string(),
            amount,
        })
        .collect();

    let summary = match resolve_top_category(&aggregates.categories, aggregates.grand_total) {
        Some(top) => {
            let saving = round_even(top.amount * config.saving_rate);
            format!(
                "Your highest spending was on {}, which accounted for {}% of your total expenses. \
                 Reducing {} spending by {} could help you save more next month.",
                top.category,
                top.percentage,
                top.category.to_lowercase(),
                format_amount(&config.currency_symbol, saving as f64)
            )
        }
        None => BALANCED_SUMMARY.to_string(),
    };

    tracing::debug!(
        month = %month,
        expenses = in_month.len(),
        total = aggregates.grand_total,
        "Summarized month"
    );

    MonthlySummary {
        month,
        total_spent: aggregates.grand_total,
        expense_count: in_month.len(),
        categories,
        summary,
    }
}
