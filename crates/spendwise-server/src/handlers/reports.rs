//! Report handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{AppError, AppState};
use spendwise_core::insights::{summarize_month, MonthlySummary, YearMonth};
use spendwise_core::{Expense, InsightRequest};

/// Request body for the monthly report
#[derive(Debug, Deserialize)]
pub struct MonthlyReportRequest {
    /// Month as YYYY-MM (defaults to the current UTC month)
    pub month: Option<String>,
    pub expenses: Vec<Expense>,
}

/// POST /api/reports/monthly - Summarize one month of the posted expenses
pub async fn monthly_report(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MonthlyReportRequest>, JsonRejection>,
) -> Result<Json<MonthlySummary>, AppError> {
    let Json(params) = body.map_err(|e| {
        warn!(error = %e, "Rejected monthly report body");
        AppError::bad_request(&e.body_text())
    })?;

    let month = match params.month.as_deref() {
        Some(s) => s
            .parse::<YearMonth>()
            .map_err(|_| AppError::bad_request("Invalid month format (use YYYY-MM)"))?,
        None => YearMonth::of(state.clock.now().date_naive()),
    };

    let request = InsightRequest::new(params.expenses);
    request.validate()?;

    let summary = summarize_month(&request.expenses, month, state.engine.config());

    info!(
        month = %month,
        expenses = summary.expense_count,
        "Generated monthly report"
    );

    Ok(Json(summary))
}
