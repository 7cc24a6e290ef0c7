//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise expense insights tool:
//! - Expense and request models with validation
//! - Rule-based insight pipeline (trend, anomaly, forecast, advice)
//! - Monthly spending summaries
//! - JSON and CSV expense import
//! - Threshold configuration with file overrides
//! - Injectable clock for deterministic reports

pub mod clock;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigSource, InsightConfig};
pub use error::{Error, Result};
pub use import::ExpenseFormat;
pub use insights::{InsightEngine, InsightReport, MonthlySummary, YearMonth};
pub use models::{Direction, Expense, InsightRequest, PopupKind, Severity};
