//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use spendwise_core::import::{load_request, ExpenseFormat};
use spendwise_core::{InsightConfig, InsightRequest};

/// Load the insight config, logging where it came from
pub fn load_config(path: Option<&Path>) -> Result<InsightConfig> {
    let (config, source) = InsightConfig::load(path).context("Failed to load insight config")?;
    debug!(source = %source, "Loaded insight config");
    Ok(config)
}

/// Read an expense file and apply `--budget` overrides
pub fn read_request(
    file: &Path,
    format: Option<&str>,
    budgets: &[String],
) -> Result<InsightRequest> {
    let format = format
        .map(|f| f.parse::<ExpenseFormat>().map_err(anyhow::Error::msg))
        .transpose()?;

    let mut request = load_request(file, format)
        .with_context(|| format!("Failed to read expenses from {}", file.display()))?;

    for spec in budgets {
        let (category, limit) = parse_budget(spec)?;
        request = request.with_budget(category, limit);
    }

    info!(
        expenses = request.expenses.len(),
        budgets = request.budgets.len(),
        "Loaded expenses from {}",
        file.display()
    );

    Ok(request)
}

/// Parse a `CATEGORY=LIMIT` budget argument
pub fn parse_budget(spec: &str) -> Result<(String, f64)> {
    let (category, limit) = spec
        .split_once('=')
        .with_context(|| format!("Invalid budget '{}' (use CATEGORY=LIMIT)", spec))?;

    let category = category.trim();
    if category.is_empty() {
        anyhow::bail!("Invalid budget '{}': category is empty", spec);
    }

    let limit: f64 = limit
        .trim()
        .parse()
        .with_context(|| format!("Invalid budget limit in '{}'", spec))?;
    if !limit.is_finite() || limit < 0.0 {
        anyhow::bail!("Invalid budget '{}': limit must be a non-negative number", spec);
    }

    Ok((category.to_string(), limit))
}

/// Resolve `--now`, defaulting to the wall clock
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => {
            let at = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("Invalid --now '{}' (use RFC 3339)", s))?;
            Ok(at.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}
