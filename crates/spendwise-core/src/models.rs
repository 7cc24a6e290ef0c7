//! Domain models for Spendwise

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single expense record supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
    /// Timestamp with the caller's offset; bucketing always converts to UTC
    pub date: DateTime<FixedOffset>,
}

impl Expense {
    pub fn new(category: impl Into<String>, amount: f64, date: DateTime<FixedOffset>) -> Self {
        Self {
            category: category.into(),
            amount,
            date,
        }
    }

    /// The expense timestamp normalized to UTC
    pub fn utc(&self) -> DateTime<Utc> {
        self.date.with_timezone(&Utc)
    }

    /// Check the record against the request schema
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("category must not be empty".to_string()));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Payload for an insight request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightRequest {
    pub expenses: Vec<Expense>,
    /// Optional spending limits keyed by category
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub budgets: HashMap<String, f64>,
}

impl InsightRequest {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            budgets: HashMap::new(),
        }
    }

    pub fn with_budget(mut self, category: impl Into<String>, limit: f64) -> Self {
        self.budgets.insert(category.into(), limit);
        self
    }

    /// Validate every expense and budget limit, naming the first offender
    pub fn validate(&self) -> Result<()> {
        for (index, expense) in self.expenses.iter().enumerate() {
            expense
                .validate()
                .map_err(|e| Error::InvalidData(format!("expenses[{}]: {}", index, e)))?;
        }
        for (category, limit) in &self.budgets {
            if !limit.is_finite() || *limit < 0.0 {
                return Err(Error::InvalidData(format!(
                    "budget for {} must be a non-negative number, got {}",
                    category, limit
                )));
            }
        }
        Ok(())
    }
}

/// Direction of a spending change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall severity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to analyze yet
    Info,
    /// Spending is spread out
    Good,
    /// One category takes a large share
    Warning,
    /// One category dominates spending
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Numeric priority for comparison (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Info => 0,
            Self::Good => 1,
            Self::Warning => 2,
            Self::Danger => 3,
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of a popup alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupKind {
    Warning,
    Danger,
}

impl PopupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for PopupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
