//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use spendwise_core::insights::format::format_amount;
use spendwise_core::insights::{summarize_month, MonthlySummary, YearMonth};

use super::{load_config, parse_now, read_request};

/// Resolve `--month`, defaulting to the UTC month containing `now`
pub fn resolve_month(month: Option<&str>, now: DateTime<Utc>) -> Result<YearMonth> {
    match month {
        Some(s) => s
            .parse::<YearMonth>()
            .map_err(anyhow::Error::msg)
            .context("Invalid --month (use YYYY-MM)"),
        None => Ok(YearMonth::of(now.date_naive())),
    }
}

/// Load the expense file and summarize one month
pub fn build_monthly_summary(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<&str>,
    month: YearMonth,
) -> Result<(MonthlySummary, String)> {
    let config = load_config(config_path)?;
    let request = read_request(file, format, &[])?;
    let summary = summarize_month(&request.expenses, month, &config);
    Ok((summary, config.currency_symbol))
}

pub fn cmd_report_monthly(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<&str>,
    month: Option<&str>,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, parse_now(now)?)?;
    let (summary, symbol) = build_monthly_summary(config_path, file, format, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📊 Spending for {}", summary.month);
    println!();
    println!(
        "   Total:    {} across {} expense(s)",
        format_amount(&symbol, summary.total_spent),
        summary.expense_count
    );

    if !summary.categories.is_empty() {
        println!();
        println!("   {:<20} {:>12}", "Category", "Amount");
        println!("   {}", "-".repeat(33));
        for item in &summary.categories {
            println!(
                "   {:<20} {:>12}",
                item.category,
                format_amount(&symbol, item.amount)
            );
        }
    }

    println!();
    println!("💡 {}", summary.summary);

    Ok(())
}
