//! Spreadsheet batch driver
//!
//! - Import: first worksheet of an .xlsx/.xls file → [`Sheet`]
//! - Convert: amount column → [`BatchReport`]
//! - Export: original columns + `Texto` (+ `Error` when rows failed) → .xlsx

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::{ExcelImporter, ALLOWED_EXTENSIONS};

use tracing::info;

use crate::columns::{find_amount_column, find_named_column, COLUMN_ALIASES};
use crate::core::{convert_batch, BatchReport, Converter, RawValue};
use crate::error::{LexNumError, LexNumResult};

/// A single worksheet: header names plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column, with short rows padded as empty.
    pub fn column_values(&self, idx: usize) -> Vec<RawValue> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(RawValue::Empty))
            .collect()
    }

    /// Resolve the amount column: an explicit name when given, the header
    /// heuristic otherwise.
    pub fn amount_column(&self, column: Option<&str>) -> LexNumResult<usize> {
        match column {
            Some(name) => find_named_column(&self.headers, name).ok_or_else(|| {
                LexNumError::MissingColumn(format!(
                    "no column named '{}' (headers: {})",
                    name,
                    self.headers.join(", ")
                ))
            }),
            None => find_amount_column(&self.headers).ok_or_else(|| {
                LexNumError::MissingColumn(format!(
                    "no header matches {:?} (headers: {})",
                    COLUMN_ALIASES,
                    self.headers.join(", ")
                ))
            }),
        }
    }
}

/// Convert the amount column of `sheet`. Returns the column index used and
/// the per-row report, aligned with `sheet.rows`.
pub fn convert_sheet(
    converter: &Converter,
    sheet: &Sheet,
    column: Option<&str>,
) -> LexNumResult<(usize, BatchReport)> {
    let idx = sheet.amount_column(column)?;
    let report = convert_batch(converter, &sheet.column_values(idx));

    info!(
        sheet = %sheet.name,
        column = %sheet.headers[idx],
        rows = sheet.row_count(),
        converted = report.converted,
        failed = report.failed,
        "converted amount column"
    );
    Ok((idx, report))
}
