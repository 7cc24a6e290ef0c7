//! RecommendationEngine: fixed rules over the upstream stage outputs
//!
//! Rules run in a fixed order and accumulate:
//! 1. Reduce top expense (always)
//! 2. High spending alert (top share at or above the high-share threshold)
//! 3. Spending increased (weekly trend going up)
//! 4. Monthly review (grand total at or above the review threshold)
//! 5. Next month forecast (forecast available)

use serde::Serialize;

use crate::config::InsightConfig;
use crate::models::{Direction, PopupKind, Severity};

use super::forecast::Forecast;
use super::format::{format_amount, round_even};
use super::top_category::TopCategory;
use super::trend::WeeklyTrend;

/// One advice item shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub icon: String,
    pub title: String,
    pub text: String,
}

impl Recommendation {
    pub fn new(icon: &str, title: &str, text: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// High-urgency alert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    #[serde(rename = "type")]
    pub kind: PopupKind,
    pub message: String,
}

/// Suggested spending cap for the top category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoBudget {
    pub category: String,
    pub suggested: i64,
    pub reason: String,
}

/// Everything the rules produce
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub recommendations: Vec<Recommendation>,
    pub severity: Severity,
    pub popup: Option<Popup>,
    pub auto_budget: AutoBudget,
    /// Suggested saving on the top category, rounded
    pub suggested_saving: i64,
}

/// Inputs the rules read
#[derive(Debug, Clone, Copy)]
pub struct RuleInputs<'a> {
    pub top: &'a TopCategory,
    pub grand_total: f64,
    pub weekly_trend: Option<&'a WeeklyTrend>,
    pub forecast: Option<&'a Forecast>,
}

/// Severity band for the top-category share
pub fn severity_for(percentage: i64, config: &InsightConfig) -> Severity {
    if percentage >= config.danger_percent {
        Severity::Danger
    } else if percentage >= config.warning_percent {
        Severity::Warning
    } else {
        Severity::Good
    }
}

/// Popup for a dominant category, if the share is high enough
pub fn popup_for(top: &TopCategory, config: &InsightConfig) -> Option<Popup> {
    if top.percentage < config.popup_percent {
        return None;
    }

    let kind = if top.percentage >= config.popup_danger_percent {
        PopupKind::Danger
    } else {
        PopupKind::Warning
    };

    Some(Popup {
        kind,
        message: format!(
            "You used {}% of your spending on {}. Control expenses to avoid overspending.",
            top.percentage, top.category
        ),
    })
}

/// Evaluate every rule
pub fn recommend(inputs: RuleInputs<'_>, config: &InsightConfig) -> Advice {
    let top = inputs.top;
    let symbol = config.currency_symbol.as_str();
    let suggested_saving = round_even(top.amount * config.saving_rate);

    let mut recommendations = vec![Recommendation::new(
        "💡",
        "Reduce top expense",
        format!(
            "Reducing {} spending by {} could improve savings.",
            top.category.to_lowercase(),
            format_amount(symbol, suggested_saving as f64)
        ),
    )];

    if top.percentage >= config.high_share_percent {
        recommendations.push(Recommendation::new(
            "⚠️",
            "High spending alert",
            format!(
                "{} alone takes {}% of your budget. Set a strict limit.",
                top.category, top.percentage
            ),
        ));
    }

    if matches!(inputs.weekly_trend, Some(trend) if trend.direction == Direction::Up) {
        recommendations.push(Recommendation::new(
            "📈",
            "Spending increased",
            "Your weekly spending has increased. Review recent transactions.",
        ));
    }

    if inputs.grand_total >= config.monthly_review_total {
        recommendations.push(Recommendation::new(
            "📊",
            "Monthly review",
            "Your expenses are high this month. Try setting daily limits.",
        ));
    }

    if let Some(forecast) = inputs.forecast {
        recommendations.push(Recommendation::new(
            "🔮",
            "Next Month Forecast",
            forecast.message.clone(),
        ));
    }

    let severity = severity_for(top.percentage, config);
    let popup = popup_for(top, config);
    let auto_budget = AutoBudget {
        category: top.category.clone(),
        suggested: round_even(top.amount * config.auto_budget_rate),
        reason: "Based on your recent spending pattern".to_string(),
    };

    tracing::debug!(
        items = recommendations.len(),
        severity = severity.as_str(),
        popup = popup.is_some(),
        "Evaluated recommendation rules"
    );

    Advice {
        recommendations,
        severity,
        popup,
        auto_budget,
        suggested_saving,
    }
}
