//! Batch conversion over spreadsheet rows or JSON arrays
//!
//! Rows are independent, so they are mapped in parallel; the report keeps the
//! caller's order and one bad row never stops the others.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::amount::Amount;
use super::converter::Converter;
use crate::error::LexNumResult;

/// A raw value as it comes out of a cell or a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Number(f64),
    Integer(i64),
    Text(String),
    /// Anything else (booleans, dates, cell errors), kept for the report.
    Other(String),
}

impl RawValue {
    /// Text shown back to the user for this input.
    pub fn display(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Text(s) | RawValue::Other(s) => s.clone(),
        }
    }

    /// Normalize to an exact amount. `Ok(None)` means the cell is blank.
    pub fn to_amount(&self) -> LexNumResult<Option<Amount>> {
        match self {
            RawValue::Empty => Ok(None),
            RawValue::Number(n) => Amount::from_f64(*n).map(Some),
            RawValue::Integer(i) => Amount::from_i64(*i).map(Some),
            RawValue::Text(s) | RawValue::Other(s) => Amount::parse(s),
        }
    }
}

impl From<&serde_json::Value> for RawValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Empty,
            // Shortest round-trip text of the parsed f64, then decimal parsing.
            serde_json::Value::Number(n) => RawValue::Text(n.to_string()),
            serde_json::Value::String(s) => RawValue::Text(s.clone()),
            other => RawValue::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RowStatus {
    Converted(String),
    Blank,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    /// Zero-based position in the input.
    pub row: usize,
    pub input: String,
    #[serde(flatten)]
    pub status: RowStatus,
}

impl RowOutcome {
    /// Converted text, or an empty string for blank and failed rows.
    pub fn text(&self) -> &str {
        match &self.status {
            RowStatus::Converted(text) => text,
            _ => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            RowStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub rows: Vec<RowOutcome>,
    pub converted: usize,
    pub blank: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

pub fn convert_value(converter: &Converter, value: &RawValue) -> RowStatus {
    let result = value
        .to_amount()
        .and_then(|amount| amount.map(|a| converter.convert_amount(&a)).transpose());
    match result {
        Ok(Some(text)) => RowStatus::Converted(text),
        Ok(None) => RowStatus::Blank,
        Err(e) => RowStatus::Failed(e.to_string()),
    }
}

/// Convert every value, preserving input order.
pub fn convert_batch(converter: &Converter, values: &[RawValue]) -> BatchReport {
    let rows: Vec<RowOutcome> = values
        .par_iter()
        .enumerate()
        .map(|(row, value)| RowOutcome {
            row,
            input: value.display(),
            status: convert_value(converter, value),
        })
        .collect();

    let mut report = BatchReport {
        rows,
        ..Default::default()
    };
    for outcome in &report.rows {
        match outcome.status {
            RowStatus::Converted(_) => report.converted += 1,
            RowStatus::Blank => report.blank += 1,
            RowStatus::Failed(_) => report.failed += 1,
        }
    }

    debug!(
        converted = report.converted,
        blank = report.blank,
        failed = report.failed,
        "batch conversion finished"
    );
    report
}
