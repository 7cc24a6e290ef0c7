//! AnomalyDetector: recent daily spending vs the days before it
//!
//! Works on distinct days that have expenses, newest first. The three most
//! recent days form the recent window and the next seven the baseline. The
//! averages always divide by 3 and 7, even when fewer days fill a window.

use serde::Serialize;

use crate::models::Severity;

use super::aggregate::DailyTotals;
use super::format::round_even_1dp;

/// Days in the recent window (also its divisor)
pub const RECENT_DAYS: usize = 3;

/// Days in the baseline window (also its divisor)
pub const BASELINE_DAYS: usize = 7;

/// Distinct days needed before a spike can be reported
pub const MIN_DAYS: usize = 8;

/// Kind of anomaly detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
}

/// A detected spending spike
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub message: String,
    /// Recent average over baseline average, one decimal
    #[serde(skip)]
    pub ratio: f64,
}

/// Flag a spike when the recent average reaches `spike_ratio` times the baseline
pub fn detect_spike(daily: &DailyTotals, spike_ratio: f64) -> Option<Anomaly> {
    if daily.len() < MIN_DAYS {
        return None;
    }

    let newest_first: Vec<f64> = daily.values().rev().copied().collect();
    let recent_sum: f64 = newest_first.iter().take(RECENT_DAYS).sum();
    let baseline_sum: f64 = newest_first
        .iter()
        .skip(RECENT_DAYS)
        .take(BASELINE_DAYS)
        .sum();

    let recent_avg = recent_sum / RECENT_DAYS as f64;
    let baseline_avg = baseline_sum / BASELINE_DAYS as f64;

    tracing::debug!(recent_avg, baseline_avg, "Computed anomaly windows");

    if baseline_avg <= 0.0 || recent_avg < baseline_avg * spike_ratio {
        return None;
    }

    let ratio = round_even_1dp(recent_avg / baseline_avg);

    Some(Anomaly {
        kind: AnomalyKind::Spike,
        severity: Severity::Danger,
        message: format!(
            "Unusual spending spike detected. Recent spending is {:.1}× higher than normal.",
            ratio
        ),
        ratio,
    })
}
