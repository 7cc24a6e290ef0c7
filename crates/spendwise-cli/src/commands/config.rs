//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};

use spendwise_core::config::default_config_path;
use spendwise_core::{ConfigSource, InsightConfig};

pub fn cmd_config(config_path: Option<&Path>, path_only: bool) -> Result<()> {
    let (config, source) =
        InsightConfig::load(config_path).context("Failed to load insight config")?;

    if path_only {
        println!("{}", source);
        return Ok(());
    }

    println!("⚙️  Insight configuration");
    println!("   Source: {}", source);
    if source == ConfigSource::Embedded {
        if let Some(path) = default_config_path() {
            println!("   Override: {} (not present)", path.display());
        }
    }
    println!();
    print!("{}", render_config(&config));

    Ok(())
}

/// Render the effective thresholds, one per line
pub fn render_config(config: &InsightConfig) -> String {
    let rows = [
        ("Currency symbol", config.currency_symbol.clone()),
        ("Saving rate", format!("{}", config.saving_rate)),
        ("Auto-budget rate", format!("{}", config.auto_budget_rate)),
        ("High share", format!("{}%", config.high_share_percent)),
        ("Warning at", format!("{}%", config.warning_percent)),
        ("Danger at", format!("{}%", config.danger_percent)),
        ("Popup at", format!("{}%", config.popup_percent)),
        ("Danger popup at", format!("{}%", config.popup_danger_percent)),
        ("Monthly review", format!("{}", config.monthly_review_total)),
        ("Spike ratio", format!("{}", config.spike_ratio)),
        ("Budget warning", format!("{}%", config.budget_warning_percent)),
    ];

    rows.iter()
        .map(|(label, value)| format!("   {:<18} {}\n", label, value))
        .collect()
}
