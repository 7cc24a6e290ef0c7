//! Insight Pipeline - Rule-based spending insights
//!
//! Turns a flat list of expenses into a single report. Every stage is a
//! pure function of its inputs; the only external input is the current
//! instant, passed in explicitly.
//!
//! ## Stages
//!
//! - **Aggregate** - Category, UTC-day and UTC-month totals
//! - **Top Category** - Largest category and its rounded share
//! - **Weekly Trend** - Last 7 days against the 7 before
//! - **Anomaly** - Recent daily average against the prior week
//! - **Forecast** - Next month from the latest month-over-month growth
//! - **Recommend** - Rule-based advice, severity and popup
//! - **Budget** - Top category against a caller-supplied limit
//! - **Report** - Assembles the response
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let report = engine.generate(&request, Utc::now());
//! ```

pub mod aggregate;
pub mod anomaly;
pub mod budget;
pub mod engine;
pub mod forecast;
pub mod format;
pub mod monthly;
pub mod recommend;
pub mod report;
pub mod top_category;
pub mod trend;

pub use aggregate::{aggregate, Aggregates, CategoryTotals, DailyTotals, MonthlyTotals, YearMonth};
pub use anomaly::{detect_spike, Anomaly, AnomalyKind};
pub use budget::{check_budget, BudgetCheck};
pub use engine::InsightEngine;
pub use forecast::{forecast_next_month, Forecast};
pub use monthly::{summarize_month, CategoryBreakdown, MonthlySummary};
pub use recommend::{recommend, Advice, AutoBudget, Popup, Recommendation, RuleInputs};
pub use report::{compose, InsightReport, ReportDetail, ReportParts};
pub use top_category::{resolve_top_category, TopCategory};
pub use trend::{week_totals, weekly_trend, WeekTotals, WeeklyTrend};
