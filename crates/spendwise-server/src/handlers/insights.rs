//! Insight handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use crate::{AppError, AppState};
use spendwise_core::{InsightReport, InsightRequest};

/// POST /api/insights - Run the insight pipeline over the posted expenses
///
/// Malformed bodies and invalid expenses are rejected with 400 before the
/// pipeline runs.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InsightRequest>, JsonRejection>,
) -> Result<Json<InsightReport>, AppError> {
    let Json(request) = body.map_err(|e| {
        warn!(error = %e, "Rejected insight request body");
        AppError::bad_request(&e.body_text())
    })?;

    request.validate()?;

    let report = state
        .engine
        .generate_with_clock(&request, state.clock.as_ref());

    info!(
        expenses = request.expenses.len(),
        severity = report.severity.as_str(),
        "Generated insight report"
    );

    Ok(Json(report))
}
