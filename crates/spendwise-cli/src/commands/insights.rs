//! Insight report commands

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use spendwise_core::insights::format::format_amount;
use spendwise_core::{Direction, InsightEngine, InsightReport, PopupKind, Severity};

use super::{load_config, parse_now, read_request};

/// Load everything and run the pipeline
pub fn build_report(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<&str>,
    now: DateTime<Utc>,
    budgets: &[String],
) -> Result<(InsightReport, String)> {
    let config = load_config(config_path)?;
    let request = read_request(file, format, budgets)?;
    let symbol = config.currency_symbol.clone();
    let report = InsightEngine::with_config(config).generate(&request, now);
    Ok((report, symbol))
}

pub fn cmd_insights(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<&str>,
    now: Option<&str>,
    budgets: &[String],
    pretty: bool,
) -> Result<()> {
    let now = parse_now(now)?;
    let (report, _) = build_report(config_path, file, format, now, budgets)?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

pub fn cmd_summary(
    config_path: Option<&Path>,
    file: &Path,
    format: Option<&str>,
    now: Option<&str>,
    budgets: &[String],
) -> Result<()> {
    let now = parse_now(now)?;
    let (report, symbol) = build_report(config_path, file, format, now, budgets)?;
    print!("{}", render_summary(&report, &symbol));
    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️ ",
        Severity::Good => "✅",
        Severity::Warning => "⚠️ ",
        Severity::Danger => "🚨",
    }
}

/// Render a report for the terminal
pub fn render_summary(report: &InsightReport, currency_symbol: &str) -> String {
    let mut out = format!("{} {}\n", severity_icon(report.severity), report.title);
    for line in report.message.lines().filter(|l| !l.is_empty()) {
        out.push_str(&format!("   {}\n", line));
    }

    let Some(detail) = &report.detail else {
        return out;
    };

    out.push('\n');
    out.push_str(&format!("   Share:    {}%\n", report.percentage));
    out.push_str(&format!("   Severity: {}\n", report.severity));
    if let Some(usage) = report.budget_usage {
        out.push_str(&format!("   Budget:   {}% used\n", usage));
    }

    out.push('\n');
    match &detail.weekly_trend {
        Some(trend) => {
            let arrow = match trend.direction {
                Direction::Up => "📈 up",
                Direction::Down => "📉 down",
            };
            out.push_str(&format!(
                "Weekly trend: {} {} vs last week\n",
                arrow,
                format_amount(currency_symbol, trend.change as f64)
            ));
        }
        None => out.push_str("Weekly trend: not enough history\n"),
    }
    out.push_str(&format!(
        "Auto budget:  {} {} ({})\n",
        detail.auto_budget.category,
        format_amount(currency_symbol, detail.auto_budget.suggested as f64),
        detail.auto_budget.reason
    ));
    out.push_str(&format!("Saving tip:   {}\n", detail.saving_tip));

    if let Some(anomaly) = &report.anomaly {
        out.push_str(&format!("\n🚨 {}\n", anomaly.message));
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!("  {} {}: {}\n", rec.icon, rec.title, rec.text));
        }
    }

    if let Some(popup) = &report.popup {
        let icon = match popup.kind {
            PopupKind::Warning => "⚠️ ",
            PopupKind::Danger => "🚨",
        };
        out.push_str(&format!("\n{} {}\n", icon, popup.message));
    }

    out
}
