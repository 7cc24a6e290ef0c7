//! TopCategoryResolver: the category with the largest total

use super::aggregate::CategoryTotals;
use super::format::percent_of;

/// The dominant category and its share of total spending
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    pub category: String,
    pub amount: f64,
    /// `round(amount / grand_total * 100)`, ties to even
    pub percentage: i64,
}

/// Pick the category with the largest total
///
/// Ties keep the category seen first. Returns `None` when there are no
/// categories or the grand total is not positive.
pub fn resolve_top_category(totals: &CategoryTotals, grand_total: f64) -> Option<TopCategory> {
    let (category, amount) = totals.iter().fold(None, |best: Option<(&str, f64)>, (c, t)| {
        match best {
            Some((_, best_total)) if t <= best_total => best,
            _ => Some((c, t)),
        }
    })?;

    let percentage = percent_of(amount, grand_total)?;

    tracing::debug!(category, amount, percentage, "Resolved top category");

    Some(TopCategory {
        category: category.to_string(),
        amount,
        percentage,
    })
}
