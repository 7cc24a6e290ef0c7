//! Insight Engine - runs the pipeline stages and composes the report

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::InsightConfig;
use crate::models::InsightRequest;

use super::aggregate::aggregate;
use super::anomaly::detect_spike;
use super::budget::check_budget;
use super::forecast::forecast_next_month;
use super::recommend::{recommend, RuleInputs};
use super::report::{compose, InsightReport, ReportParts};
use super::top_category::resolve_top_category;
use super::trend::weekly_trend;

/// Stateless insight pipeline
///
/// Holds only the rule configuration; every call reads its request and the
/// given instant and nothing else.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    /// Create an engine with the default rule thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Produce the report, reading the current instant from `clock`
    pub fn generate_with_clock(&self, request: &InsightRequest, clock: &dyn Clock) -> InsightReport {
        self.generate(request, clock.now())
    }

    /// Produce the report for `request` as of `now`
    pub fn generate(&self, request: &InsightRequest, now: DateTime<Utc>) -> InsightReport {
        if request.expenses.is_empty() {
            tracing::debug!("No expenses supplied, returning empty report");
            return InsightReport::empty();
        }

        let aggregates = aggregate(&request.expenses);

        let Some(top) = resolve_top_category(&aggregates.categories, aggregates.grand_total)
        else {
            tracing::debug!(
                total = aggregates.grand_total,
                "Nothing spent, returning empty report"
            );
            return InsightReport::empty();
        };

        let weekly_trend = weekly_trend(&request.expenses, now);
        let anomaly = detect_spike(&aggregates.daily, self.config.spike_ratio);
        let forecast = forecast_next_month(&aggregates.monthly, &self.config.currency_symbol);

        let advice = recommend(
            RuleInputs {
                top: &top,
                grand_total: aggregates.grand_total,
                weekly_trend: weekly_trend.as_ref(),
                forecast: forecast.as_ref(),
            },
            &self.config,
        );

        let budget = check_budget(&top, &request.budgets, &self.config);

        let report = compose(
            ReportParts {
                top,
                advice,
                weekly_trend,
                anomaly,
                forecast,
                budget,
            },
            &self.config.currency_symbol,
        );

        tracing::debug!(
            percentage = report.percentage,
            severity = report.severity.as_str(),
            recommendations = report.recommendations.len(),
            anomaly = report.anomaly.is_some(),
            forecast = report.forecast.is_some(),
            "Insight report generated"
        );

        report
    }
}
