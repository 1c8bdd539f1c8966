//! Excel importer implementation - Excel (.xlsx/.xls) → Sheet

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use super::Sheet;
use crate::core::RawValue;
use crate::error::{LexNumError, LexNumResult};

/// Accepted workbook extensions (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Reads the first worksheet of a workbook into a [`Sheet`].
pub struct ExcelImporter;

impl ExcelImporter {
    /// Reject file names without an accepted spreadsheet extension.
    pub fn check_file_name(file_name: &str) -> LexNumResult<()> {
        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            _ => {
                return Err(LexNumError::Format(format!(
                    "'{}' has no file extension",
                    file_name
                )))
            }
        };
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(LexNumError::Format(format!(
                "only Excel files (.xlsx, .xls) are supported, got '.{}'",
                extension
            )));
        }
        Ok(())
    }

    /// Import from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LexNumResult<Sheet> {
        let path = path.as_ref();
        Self::check_file_name(&path.to_string_lossy())?;

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| LexNumError::Excel(format!("Failed to open Excel file: {}", e)))?;
        Self::read_first_sheet(&mut workbook)
    }

    /// Import from an uploaded file held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> LexNumResult<Sheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| LexNumError::Excel(format!("Failed to read Excel data: {}", e)))?;
        Self::read_first_sheet(&mut workbook)
    }

    fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> LexNumResult<Sheet> {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LexNumError::Excel("Workbook has no worksheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| LexNumError::Excel(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;

        Ok(Self::process_range(&sheet_name, &range))
    }

    /// Row 0 is the header; every remaining row is data.
    fn process_range(sheet_name: &str, range: &Range<Data>) -> Sheet {
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Data::String(s) => s.clone(),
                    Data::Empty => format!("col_{}", col),
                    other => other.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        let rows = rows
            .map(|row| row.iter().map(cell_to_raw).collect())
            .collect();

        Sheet {
            name: sheet_name.to_string(),
            headers,
            rows,
        }
    }
}

fn cell_to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Integer(*i),
        Data::String(s) if s.trim().is_empty() => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        other => RawValue::Other(other.to_string()),
    }
}
