//! Insight rule configuration
//!
//! Thresholds and rates used by the recommendation rules.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/spendwise/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Rule thresholds for the insight pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightConfig {
    /// Prefix for amounts in generated text
    pub currency_symbol: String,
    /// Share of the top category suggested as a saving
    pub saving_rate: f64,
    /// Share of the top category suggested as its budget cap
    pub auto_budget_rate: f64,
    /// Percentage at which the high spending alert fires
    pub high_share_percent: i64,
    /// Percentage at which severity becomes warning
    pub warning_percent: i64,
    /// Percentage at which severity becomes danger
    pub danger_percent: i64,
    /// Percentage at which a popup is shown
    pub popup_percent: i64,
    /// Percentage at which the popup becomes a danger popup
    pub popup_danger_percent: i64,
    /// Grand total that triggers the monthly review item
    pub monthly_review_total: f64,
    /// Recent/baseline ratio that counts as a spike
    pub spike_ratio: f64,
    /// Budget usage percentage that triggers a warning
    pub budget_warning_percent: i64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            saving_rate: 0.15,
            auto_budget_rate: 0.9,
            high_share_percent: 50,
            warning_percent: 40,
            danger_percent: 60,
            popup_percent: 80,
            popup_danger_percent: 100,
            monthly_review_total: 5000.0,
            spike_ratio: 1.8,
            budget_warning_percent: 80,
        }
    }
}

/// Where a loaded config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from a file on disk
    File(PathBuf),
    /// Embedded defaults
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "embedded defaults"),
        }
    }
}

impl InsightConfig {
    /// Load configuration (explicit path or data-dir override, then embedded default)
    ///
    /// An explicit path that does not exist is an error; a missing data-dir
    /// override silently falls back to the embedded defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let config = Self::from_file(&default_path)?;
                tracing::debug!(path = %default_path.display(), "Loaded config override");
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        parse_config(&content)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    currency: Option<RawCurrency>,
    savings: Option<RawSavings>,
    thresholds: Option<RawThresholds>,
    anomaly: Option<RawAnomaly>,
    budget: Option<RawBudget>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSavings {
    reduce_rate: Option<f64>,
    auto_budget_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_share_percent: Option<i64>,
    warning_percent: Option<i64>,
    danger_percent: Option<i64>,
    popup_percent: Option<i64>,
    popup_danger_percent: Option<i64>,
    monthly_review_total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAnomaly {
    spike_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    warning_percent: Option<i64>,
}

fn parse_config(content: &str) -> Result<InsightConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightConfig::default();

    if let Some(currency) = raw.currency {
        if let Some(symbol) = currency.symbol {
            config.currency_symbol = symbol;
        }
    }

    if let Some(savings) = raw.savings {
        if let Some(rate) = savings.reduce_rate {
            config.saving_rate = rate;
        }
        if let Some(rate) = savings.auto_budget_rate {
            config.auto_budget_rate = rate;
        }
    }

    if let Some(thresholds) = raw.thresholds {
        if let Some(v) = thresholds.high_share_percent {
            config.high_share_percent = v;
        }
        if let Some(v) = thresholds.warning_percent {
            config.warning_percent = v;
        }
        if let Some(v) = thresholds.danger_percent {
            config.danger_percent = v;
        }
        if let Some(v) = thresholds.popup_percent {
            config.popup_percent = v;
        }
        if let Some(v) = thresholds.popup_danger_percent {
            config.popup_danger_percent = v;
        }
        if let Some(v) = thresholds.monthly_review_total {
            config.monthly_review_total = v;
        }
    }

    if let Some(anomaly) = raw.anomaly {
        if let Some(ratio) = anomaly.spike_ratio {
            config.spike_ratio = ratio;
        }
    }

    if let Some(budget) = raw.budget {
        if let Some(v) = budget.warning_percent {
            config.budget_warning_percent = v;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &InsightConfig) -> Result<()> {
    let rates = [
        ("savings.reduce_rate", config.saving_rate),
        ("savings.auto_budget_rate", config.auto_budget_rate),
        ("thresholds.monthly_review_total", config.monthly_review_total),
    ];
    for (key, value) in rates {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Config(format!("{} must be non-negative", key)));
        }
    }
    if !config.spike_ratio.is_finite() || config.spike_ratio <= 0.0 {
        return Err(Error::Config("anomaly.spike_ratio must be positive".to_string()));
    }
    if config.warning_percent > config.danger_percent {
        return Err(Error::Config(
            "thresholds.warning_percent must not exceed thresholds.danger_percent".to_string(),
        ));
    }
    Ok(())
}
