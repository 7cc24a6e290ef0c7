//! InsightComposer: assembles stage outputs into the final report
//!
//! No decisions are made here. Each optional field is present exactly when
//! the stage that produces it returned something.

use serde::Serialize;

use crate::models::Severity;

use super::anomaly::Anomaly;
use super::budget::BudgetCheck;
use super::forecast::Forecast;
use super::format::format_amount;
use super::recommend::{Advice, AutoBudget, Popup, Recommendation};
use super::top_category::TopCategory;
use super::trend::WeeklyTrend;

/// Title of the report returned for an empty expense set
pub const EMPTY_TITLE: &str = "No insights yet";

/// Message of the report returned for an empty expense set
pub const EMPTY_MESSAGE: &str = "Start adding expenses to get smart insights.";

/// The single response value of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub title: String,
    pub message: String,
    pub percentage: i64,
    pub severity: Severity,
    /// Missing entirely (no keys) for the empty report
    #[serde(flatten)]
    pub detail: Option<ReportDetail>,
    pub recommendations: Vec<Recommendation>,
    pub popup: Option<Popup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_usage: Option<i64>,
}

/// Fields that only exist once a top category was found
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub saving_tip: String,
    pub weekly_trend: Option<WeeklyTrend>,
    pub auto_budget: AutoBudget,
}

/// Stage outputs handed to the composer
#[derive(Debug, Clone)]
pub struct ReportParts {
    pub top: TopCategory,
    pub advice: Advice,
    pub weekly_trend: Option<WeeklyTrend>,
    pub anomaly: Option<Anomaly>,
    pub forecast: Option<Forecast>,
    pub budget: Option<BudgetCheck>,
}

impl InsightReport {
    /// Fixed report for an expense set with nothing to analyze
    pub fn empty() -> Self {
        Self {
            title: EMPTY_TITLE.to_string(),
            message: EMPTY_MESSAGE.to_string(),
            percentage: 0,
            severity: Severity::Info,
            detail: None,
            recommendations: Vec::new(),
            popup: None,
            anomaly: None,
            forecast: None,
            budget_usage: None,
        }
    }

    /// Whether this is the no-insights report
    pub fn is_empty(&self) -> bool {
        self.detail.is_none()
    }
}

/// Assemble a report from stage outputs
pub fn compose(parts: ReportParts, currency_symbol: &str) -> InsightReport {
    let ReportParts {
        top,
        advice,
        weekly_trend,
        anomaly,
        forecast,
        budget,
    } = parts;

    let mut message = format!(
        "{} accounts for {}% of your spending.\n\nYou spent {} on this category.",
        top.category,
        top.percentage,
        format_amount(currency_symbol, top.amount)
    );
    if let Some(notice) = budget.as_ref().and_then(|b| b.notice.as_deref()) {
        message.push_str("\n\n");
        message.push_str(notice);
    }

    let severity = match &budget {
        Some(check) => check.apply_severity(advice.severity),
        None => advice.severity,
    };

    let saving_tip = format!(
        "If you reduce {} spending by {}, you could save more this month.",
        top.category.to_lowercase(),
        format_amount(currency_symbol, advice.suggested_saving as f64)
    );

    InsightReport {
        title: format!("{} is your top expense", top.category),
        message,
        percentage: top.percentage,
        severity,
        detail: Some(ReportDetail {
            saving_tip,
            weekly_trend,
            auto_budget: advice.auto_budget,
        }),
        recommendations: advice.recommendations,
        popup: advice.popup,
        anomaly,
        forecast,
        budget_usage: budget.map(|b| b.usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_shape() {
        let json = serde_json::to_value(InsightReport::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "No insights yet",
                "message": "Start adding expenses to get smart insights.",
                "percentage": 0,
                "severity": "info",
                "recommendations": [],
                "popup": null
            })
        );
    }
}
