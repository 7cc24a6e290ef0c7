//! BudgetGuard: compares the top category against a caller-supplied limit

use std::collections::HashMap;

use crate::config::InsightConfig;
use crate::models::Severity;

use super::format::percent_of;
use super::top_category::TopCategory;

/// Outcome of checking the top category against its budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCheck {
    /// Rounded share of the limit already spent
    pub usage: i64,
    /// Text appended to the report message, if any
    pub notice: Option<String>,
    /// Severity the report must be raised to, if any
    pub escalate_to: Option<Severity>,
}

impl BudgetCheck {
    /// Apply to a severity without ever lowering it
    pub fn apply_severity(&self, current: Severity) -> Severity {
        match self.escalate_to {
            Some(target) if target.priority() > current.priority() => target,
            _ => current,
        }
    }
}

/// Check the top category against `budgets`
///
/// Absent when the category has no budget or the limit is not positive.
pub fn check_budget(
    top: &TopCategory,
    budgets: &HashMap<String, f64>,
    config: &InsightConfig,
) -> Option<BudgetCheck> {
    let limit = *budgets.get(&top.category)?;
    let usage = percent_of(top.amount, limit)?;

    let check = if usage >= 100 {
        BudgetCheck {
            usage,
            notice: Some(format!(
                "🚨 You have exceeded your {} budget.",
                top.category
            )),
            escalate_to: Some(Severity::Danger),
        }
    } else if usage >= config.budget_warning_percent {
        BudgetCheck {
            usage,
            notice: Some(format!(
                "⚠️ You’ve used {}% of your {} budget.",
                usage, top.category
            )),
            escalate_to: Some(Severity::Warning),
        }
    } else {
        BudgetCheck {
            usage,
            notice: None,
            escalate_to: None,
        }
    };

    tracing::debug!(
        category = %top.category,
        limit,
        usage,
        "Checked top category budget"
    );

    Some(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(amount: f64) -> TopCategory {
        TopCategory {
            category: "Food".to_string(),
            amount,
            percentage: 70,
        }
    }

    fn budgets(limit: f64) -> HashMap<String, f64> {
        HashMap::from([("Food".to_string(), limit)])
    }

    #[test]
    fn test_no_budget_for_category() {
        let config = InsightConfig::default();
        assert!(check_budget(&food(100.0), &HashMap::new(), &config).is_none());
        assert!(check_budget(&food(100.0), &budgets(0.0), &config).is_none());
    }

    #[test]
    fn test_under_budget() {
        let config = InsightConfig::default();
        let check = check_budget(&food(500.0), &budgets(1000.0), &config).unwrap();
        assert_eq!(check.usage, 50);
        assert!(check.notice.is_none());
        assert_eq!(check.apply_severity(Severity::Good), Severity::Good);
    }

    #[test]
    fn test_near_budget_warns() {
        let config = InsightConfig::default();
        let check = check_budget(&food(850.0), &budgets(1000.0), &config).unwrap();
        assert_eq!(check.usage, 85);
        assert_eq!(
            check.notice.as_deref(),
            Some("⚠️ You’ve used 85% of your Food budget.")
        );
        assert_eq!(check.apply_severity(Severity::Good), Severity::Warning);
        // never downgrades
        assert_eq!(check.apply_severity(Severity::Danger), Severity::Danger);
    }

    #[test]
    fn test_over_budget_is_danger() {
        let config = InsightConfig::default();
        let check = check_budget(&food(1200.0), &budgets(1000.0), &config).unwrap();
        assert_eq!(check.usage, 120);
        assert_eq!(
            check.notice.as_deref(),
            Some("🚨 You have exceeded your Food budget.")
        );
        assert_eq!(check.apply_severity(Severity::Warning), Severity::Danger);
    }
}
