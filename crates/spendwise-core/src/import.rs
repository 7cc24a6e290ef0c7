//! Expense file import (JSON and CSV)
//!
//! JSON files hold either a full request object (`{"expenses": [...],
//! "budgets": {...}}`) or a bare array of expenses. CSV files need a header
//! row with `category`, `amount` and `date` columns in any order.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Expense, InsightRequest};

/// Supported expense file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFormat {
    Json,
    Csv,
}

impl ExpenseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        ext.parse().ok()
    }
}

impl std::str::FromStr for ExpenseFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown expense format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a JSON request object or bare expense array
///
/// Each expense is decoded on its own so a bad record is reported by index.
pub fn parse_json<R: Read>(reader: R) -> Result<InsightRequest> {
    let value: Value = serde_json::from_reader(reader)?;

    let (items, budgets) = match value {
        Value::Array(items) => (items, HashMap::new()),
        Value::Object(mut fields) => {
            let items = match fields.remove("expenses") {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(Error::InvalidData(
                        "'expenses' must be an array".to_string(),
                    ))
                }
                None => {
                    return Err(Error::InvalidData(
                        "JSON object is missing an 'expenses' field".to_string(),
                    ))
                }
            };
            let budgets = match fields.remove("budgets") {
                Some(budgets) => serde_json::from_value(budgets)
                    .map_err(|e| Error::InvalidData(format!("budgets: {}", e)))?,
                None => HashMap::new(),
            };
            (items, budgets)
        }
        _ => {
            return Err(Error::InvalidData(
                "Expected an expense array or an object with 'expenses'".to_string(),
            ))
        }
    };

    let expenses = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Expense>(item)
                .map_err(|e| Error::InvalidData(format!("expenses[{}]: {}", index, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let request = InsightRequest { expenses, budgets };
    request.validate()?;

    debug!("Parsed {} expenses from JSON", request.expenses.len());
    Ok(request)
}

/// Parse CSV with `category,amount,date` columns
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let category_col = column(&headers, "category")?;
    let amount_col = column(&headers, "amount")?;
    let date_col = column(&headers, "date")?;

    let mut expenses = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // header is line 1
        let line = index + 2;

        let category = record
            .get(category_col)
            .ok_or_else(|| Error::InvalidData(format!("line {}: missing category", line)))?;
        let amount = record
            .get(amount_col)
            .ok_or_else(|| "missing amount".to_string())
            .and_then(parse_amount)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;
        let date = record
            .get(date_col)
            .ok_or_else(|| "missing date".to_string())
            .and_then(parse_timestamp)
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;

        let expense = Expense::new(category, amount, date);
        expense
            .validate()
            .map_err(|e| Error::InvalidData(format!("line {}: {}", line, e)))?;
        expenses.push(expense);
    }

    debug!("Parsed {} expenses from CSV", expenses.len());
    Ok(expenses)
}

/// Load an expense file, picking the parser from `format` or the extension
pub fn load_request(path: &Path, format: Option<ExpenseFormat>) -> Result<InsightRequest> {
    let format = format
        .or_else(|| ExpenseFormat::from_path(path))
        .ok_or_else(|| {
            Error::InvalidData(format!(
                "Cannot tell the format of {} (use a .json or .csv extension)",
                path.display()
            ))
        })?;

    let file = std::fs::File::open(path)?;
    match format {
        ExpenseFormat::Json => parse_json(file),
        ExpenseFormat::Csv => Ok(InsightRequest::new(parse_csv(file)?)),
    }
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidData(format!("CSV header is missing a '{}' column", name)))
}

/// Parse a timestamp with offset; a bare `YYYY-MM-DD` date means midnight UTC
fn parse_timestamp(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(format!("Unable to parse date: {}", s))
}

fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned = s.trim().replace(['$', '₹', '€', '£', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| format!("Unable to parse amount: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_request_object() {
        let json = r#"{
            "expenses": [
                {"category": "Food", "amount": 10, "date": "2024-01-01T10:00:00+05:30"}
            ],
            "budgets": {"Food": 500}
        }"#;
        let request = parse_json(json.as_bytes()).unwrap();
        assert_eq!(request.expenses.len(), 1);
        assert_eq!(request.budgets.get("Food"), Some(&500.0));
    }

    #[test]
    fn test_parse_json_bare_array() {
        let json = r#"[
            {"category": "Food", "amount": 10.5, "date": "2024-01-01T10:00:00Z"},
            {"category": "Rent", "amount": 900, "date": "2024-01-02T10:00:00Z"}
        ]"#;
        let request = parse_json(json.as_bytes()).unwrap();
        assert_eq!(request.expenses.len(), 2);
        assert!(request.budgets.is_empty());
    }

    #[test]
    fn test_parse_json_rejects_negative() {
        let json = r#"[{"category": "Food", "amount": -3, "date": "2024-01-01T10:00:00Z"}]"#;
        assert!(parse_json(json.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json_names_bad_record() {
        let json = r#"{"expenses": [
            {"category": "Food", "amount": 10, "date": "2024-01-01T10:00:00Z"},
            {"category": "Food", "amount": "ten", "date": "2024-01-02T10:00:00Z"}
        ]}"#;
        let err = parse_json(json.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("expenses[1]"), "{}", err);
        assert!(err.contains("\"ten\""), "{}", err);
    }

    #[test]
    fn test_parse_json_missing_field_in_array() {
        let json = r#"[{"category": "Food", "amount": 10}]"#;
        let err = parse_json(json.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("expenses[0]"), "{}", err);
        assert!(err.contains("date"), "{}", err);
    }

    #[test]
    fn test_parse_json_rejects_other_shapes() {
        assert!(parse_json(r#"{"items": []}"#.as_bytes()).is_err());
        assert!(parse_json(r#"{"expenses": {}}"#.as_bytes()).is_err());
        assert!(parse_json("42".as_bytes()).is_err());
        let err = parse_json(r#"{"expenses": [], "budgets": {"Food": "x"}}"#.as_bytes())
            .unwrap_err()
            .to_string();
        assert!(err.contains("budgets"), "{}", err);
    }

    #[test]
    fn test_parse_csv() {
        let csv = "date,category,amount\n\
                   2024-01-15T09:30:00+01:00,Food,\"1,250.00\"\n\
                   2024-01-16,Travel,₹300\n";
        let expenses = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].amount, 1250.0);
        assert_eq!(expenses[0].utc().to_rfc3339(), "2024-01-15T08:30:00+00:00");
        assert_eq!(expenses[1].amount, 300.0);
        assert_eq!(expenses[1].utc().to_rfc3339(), "2024-01-16T00:00:00+00:00");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "category,amount\nFood,10\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("'date'"));
    }

    #[test]
    fn test_parse_csv_bad_row_names_line() {
        let csv = "category,amount,date\nFood,10,2024-01-01\nFood,abc,2024-01-02\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("line 3"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExpenseFormat::from_path(Path::new("x/expenses.CSV")),
            Some(ExpenseFormat::Csv)
        );
        assert_eq!(
            ExpenseFormat::from_path(Path::new("expenses.json")),
            Some(ExpenseFormat::Json)
        );
        assert_eq!(ExpenseFormat::from_path(Path::new("expenses")), None);
    }
}
