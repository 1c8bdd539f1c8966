use crate::columns::{find_amount_column, normalize_header};
use crate::core::{Converter, RowStatus, DEFAULT_MAX_PESOS};
use crate::error::{LexNumError, LexNumResult};
use crate::excel::{self, ExcelExporter, ExcelImporter};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Build the converter for a command, honoring `--max-pesos`.
fn converter_for(max_pesos: Option<u64>) -> LexNumResult<Converter> {
    Converter::with_max_pesos(max_pesos.unwrap_or(DEFAULT_MAX_PESOS))
}

/// `<dir>/<stem>_texto.xlsx` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resultado".to_string());
    input.with_file_name(format!("{}_texto.xlsx", stem))
}

/// Execute the convert command
///
/// Prints one line per amount. Every amount is attempted; the command fails
/// afterwards if any of them could not be converted.
pub fn convert(amounts: Vec<String>, max_pesos: Option<u64>) -> LexNumResult<()> {
    let converter = converter_for(max_pesos)?;
    let mut failed = 0usize;

    for amount in &amounts {
        match converter.convert_str(amount) {
            Ok(Some(text)) => println!("{}", text),
            Ok(None) => println!(),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "❌".red(), amount.bold(), e);
            }
        }
    }

    if failed > 0 {
        return Err(LexNumError::Format(format!(
            "{} of {} amounts could not be converted",
            failed,
            amounts.len()
        )));
    }
    Ok(())
}

/// Execute the excel command
pub fn excel(
    input: PathBuf,
    output: Option<PathBuf>,
    column: Option<String>,
    max_pesos: Option<u64>,
    verbose: bool,
) -> LexNumResult<()> {
    let output = output.unwrap_or_else(|| default_output_path(&input));
    println!("{}", "🔤 LexNum - Excel Conversion".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let converter = converter_for(max_pesos)?;

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }
    let sheet = ExcelImporter::from_path(&input)?;
    if verbose {
        println!(
            "   Sheet {}: {} columns, {} rows\n",
            sheet.name.bright_blue(),
            sheet.headers.len(),
            sheet.row_count()
        );
    }

    let (idx, report) = excel::convert_sheet(&converter, &sheet, column.as_deref())?;
    if verbose {
        println!(
            "{} {}",
            "🧮 Converting column".cyan(),
            sheet.headers[idx].bright_blue().bold()
        );
        for outcome in &report.rows {
            if let RowStatus::Failed(message) = &outcome.status {
                // +2: header row and 1-based numbering
                println!(
                    "   {} row {}: {} ({})",
                    "⚠️".yellow(),
                    outcome.row + 2,
                    outcome.input,
                    message
                );
            }
        }
        println!();
    }

    ExcelExporter::new(&sheet, &report).export(&output)?;

    println!("{}", "✅ Conversion Complete!".bold().green());
    println!("   Converted: {}", report.converted.to_string().green());
    println!("   Blank:     {}", report.blank);
    if report.has_failures() {
        println!(
            "   Failed:    {} (see the Error column)",
            report.failed.to_string().red()
        );
    }
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the columns command
pub fn columns(input: PathBuf) -> LexNumResult<()> {
    let sheet = ExcelImporter::from_path(&input)?;
    let detected = find_amount_column(&sheet.headers);

    println!("{}", "📋 Columns".bold().cyan());
    println!("   File: {}", input.display());
    println!("   Sheet: {}\n", sheet.name.bright_blue());

    for (idx, header) in sheet.headers.iter().enumerate() {
        let marker = if Some(idx) == detected {
            "← amount column".green().to_string()
        } else {
            String::new()
        };
        println!(
            "   {:>3}  {:<30} {:<20} {}",
            idx,
            header,
            normalize_header(header).dimmed(),
            marker
        );
    }
    println!();

    if detected.is_none() {
        println!(
            "{}",
            "⚠️  No amount column detected (expected 'Número' or 'Num'); use --column".yellow()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let out = default_output_path(Path::new("/tmp/montos.xlsx"));
        assert_eq!(out, PathBuf::from("/tmp/montos_texto.xlsx"));

        let out = default_output_path(Path::new("datos.xls"));
        assert_eq!(out, PathBuf::from("datos_texto.xlsx"));
    }

    #[test]
    fn test_convert_all_valid() {
        let result = convert(vec!["1523.45".to_string(), "".to_string()], None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_convert_reports_failure_after_processing_all() {
        let result = convert(vec!["abc".to_string(), "10".to_string()], None);
        assert!(matches!(result, Err(LexNumError::Format(_))));
    }

    #[test]
    fn test_convert_honors_ceiling() {
        assert!(convert(vec!["5000".to_string()], Some(1000)).is_err());
        assert!(convert(vec!["5000".to_string()], Some(10_000)).is_ok());
    }

    #[test]
    fn test_excel_missing_file() {
        let result = excel(
            PathBuf::from("nonexistent.xlsx"),
            None,
            None,
            None,
            false,
        );
        assert!(result.is_err());
    }
}
