//! Excel exporter implementation

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::Sheet;
use crate::columns::{ERROR_COLUMN, TEXT_COLUMN};
use crate::core::{BatchReport, RawValue};
use crate::error::{LexNumError, LexNumResult};

const TEXT_COLUMN_WIDTH: f64 = 70.0;
const ERROR_COLUMN_WIDTH: f64 = 45.0;

/// Writes the original sheet plus the converted text column.
pub struct ExcelExporter<'a> {
    sheet: &'a Sheet,
    report: &'a BatchReport,
}

impl<'a> ExcelExporter<'a> {
    /// `report.rows[i]` must describe `sheet.rows[i]`.
    pub fn new(sheet: &'a Sheet, report: &'a BatchReport) -> Self {
        Self { sheet, report }
    }

    /// Export to an .xlsx file
    pub fn export(&self, output_path: &Path) -> LexNumResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| LexNumError::Excel(format!("Failed to save Excel file: {}", e)))
    }

    /// Export to an in-memory .xlsx buffer (for HTTP downloads)
    pub fn to_bytes(&self) -> LexNumResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| LexNumError::Excel(format!("Failed to build Excel file: {}", e)))
    }

    fn build(&self) -> LexNumResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if !self.sheet.name.is_empty() {
            worksheet
                .set_name(&self.sheet.name)
                .map_err(|e| LexNumError::Excel(format!("Failed to set worksheet name: {}", e)))?;
        }

        let header_format = Format::new().set_bold();
        // An existing Texto/Error column is overwritten rather than duplicated.
        let mut next_col = self.sheet.headers.len();
        let mut place = |name: &str| {
            self.sheet
                .headers
                .iter()
                .position(|h| h == name)
                .unwrap_or_else(|| {
                    next_col += 1;
                    next_col - 1
                })
        };
        let text_idx = place(TEXT_COLUMN);
        let error_idx = if self.report.has_failures() {
            Some(place(ERROR_COLUMN))
        } else {
            None
        };
        let text_col = column_number(text_idx)?;
        let error_col = error_idx.map(column_number).transpose()?;

        for (idx, header) in self.sheet.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, column_number(idx)?, header, &header_format)
                .map_err(write_error)?;
        }
        worksheet
            .write_string_with_format(0, text_col, TEXT_COLUMN, &header_format)
            .map_err(write_error)?;
        worksheet
            .set_column_width(text_col, TEXT_COLUMN_WIDTH)
            .map_err(write_error)?;
        if let Some(col) = error_col {
            worksheet
                .write_string_with_format(0, col, ERROR_COLUMN, &header_format)
                .map_err(write_error)?;
            worksheet
                .set_column_width(col, ERROR_COLUMN_WIDTH)
                .map_err(write_error)?;
        }

        for (idx, row) in self.sheet.rows.iter().enumerate() {
            let excel_row = row_number(idx + 1)?;
            for (col, value) in row.iter().enumerate() {
                if col == text_idx || Some(col) == error_idx {
                    continue;
                }
                write_cell(worksheet, excel_row, column_number(col)?, value)?;
            }

            let Some(outcome) = self.report.rows.get(idx) else {
                continue;
            };
            if !outcome.text().is_empty() {
                worksheet
                    .write_string(excel_row, text_col, outcome.text())
                    .map_err(write_error)?;
            }
            if let (Some(col), Some(message)) = (error_col, outcome.error()) {
                worksheet
                    .write_string(excel_row, col, message)
                    .map_err(write_error)?;
            }
        }

        Ok(workbook)
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &RawValue) -> LexNumResult<()> {
    match value {
        RawValue::Empty => {}
        RawValue::Number(n) => {
            worksheet.write_number(row, col, *n).map_err(write_error)?;
        }
        RawValue::Integer(i) => {
            worksheet
                .write_number(row, col, *i as f64)
                .map_err(write_error)?;
        }
        RawValue::Text(s) | RawValue::Other(s) => {
            worksheet.write_string(row, col, s).map_err(write_error)?;
        }
    }
    Ok(())
}

fn column_number(idx: usize) -> LexNumResult<u16> {
    u16::try_from(idx)
        .map_err(|_| LexNumError::Excel(format!("Column index {} is beyond Excel limits", idx)))
}

fn row_number(idx: usize) -> LexNumResult<u32> {
    u32::try_from(idx)
        .map_err(|_| LexNumError::Excel(format!("Row index {} is beyond Excel limits", idx)))
}

fn write_error(e: rust_xlsxwriter::XlsxError) -> LexNumError {
    LexNumError::Excel(format!("Failed to write cell: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{convert_batch, Converter};
    use crate::excel::ExcelImporter;

    fn sheet_with(headers: &[&str], rows: Vec<Vec<RawValue>>) -> Sheet {
        Sheet {
            name: "Hoja1".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    fn export_and_reload(sheet: &Sheet, amount_col: usize) -> Sheet {
        let report = convert_batch(&Converter::new(), &sheet.column_values(amount_col));
        let bytes = ExcelExporter::new(sheet, &report).to_bytes().unwrap();
        ExcelImporter::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_appends_texto_column() {
        let sheet = sheet_with(&["Num"], vec![vec![RawValue::Number(1320.0)]]);
        let reloaded = export_and_reload(&sheet, 0);

        assert_eq!(reloaded.name, "Hoja1");
        assert_eq!(reloaded.headers, vec!["Num", "Texto"]);
        assert_eq!(
            reloaded.rows[0][1],
            RawValue::Text("MIL TRESCIENTOS VEINTE PESOS 00/100 M.N.".to_string())
        );
    }

    #[test]
    fn test_error_column_only_when_rows_fail() {
        let clean = sheet_with(&["Num"], vec![vec![RawValue::Integer(5)]]);
        assert_eq!(export_and_reload(&clean, 0).headers, vec!["Num", "Texto"]);

        let dirty = sheet_with(
            &["Num"],
            vec![vec![RawValue::Integer(5)], vec![RawValue::Text("abc".to_string())]],
        );
        let reloaded = export_and_reload(&dirty, 0);
        assert_eq!(reloaded.headers, vec!["Num", "Texto", "Error"]);
        assert!(matches!(&reloaded.rows[1][2], RawValue::Text(msg) if msg.contains("abc")));
    }

    #[test]
    fn test_existing_texto_column_is_overwritten() {
        let sheet = sheet_with(
            &["Texto", "Número"],
            vec![vec![RawValue::Text("viejo".to_string()), RawValue::Integer(2)]],
        );
        let reloaded = export_and_reload(&sheet, 1);

        assert_eq!(reloaded.headers, vec!["Texto", "Número"]);
        assert_eq!(
            reloaded.rows[0][0],
            RawValue::Text("DOS PESOS 00/100 M.N.".to_string())
        );
    }
}
