//! CLI Integration Tests
//!
//! Tests the `lexnum` and `lexnum-server` binaries directly using assert_cmd.
//!
//! Skipped during coverage runs, where the binaries are not instrumented.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use lexnum::core::RawValue;
use lexnum::excel::ExcelImporter;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn lexnum() -> Command {
    Command::cargo_bin("lexnum").unwrap()
}

fn amounts_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("montos.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Número").unwrap();
    worksheet.write_number(1, 0, 1320.0).unwrap();
    worksheet.write_string(2, 0, "no es número").unwrap();
    worksheet.write_number(3, 0, 1.0).unwrap();
    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    lexnum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lexnum"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    lexnum()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_server_help() {
    Command::cargo_bin("lexnum-server")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-file-size-mb"))
        .stdout(predicate::str::contains("--output-filename"));
}

#[test]
fn test_server_rejects_bad_config() {
    Command::cargo_bin("lexnum-server")
        .unwrap()
        .args(["--max-file-size-mb", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_file_size_mb"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERT COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_convert_single_amount() {
    lexnum()
        .args(["convert", "1523.45"])
        .assert()
        .success()
        .stdout("MIL QUINIENTOS VEINTITRÉS PESOS 45/100 M.N.\n");
}

#[test]
fn test_convert_many_amounts_in_order() {
    lexnum()
        .args(["convert", "$1,320.00", "1", "21000"])
        .assert()
        .success()
        .stdout(
            "MIL TRESCIENTOS VEINTE PESOS 00/100 M.N.\n\
             UN PESO 00/100 M.N.\n\
             VEINTIÚN MIL PESOS 00/100 M.N.\n",
        );
}

#[test]
fn test_convert_failure_still_prints_the_rest() {
    lexnum()
        .args(["convert", "-5", "10"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("DIEZ PESOS 00/100 M.N."))
        .stderr(predicate::str::contains("Range error"));
}

#[test]
fn test_convert_max_pesos_from_env() {
    lexnum()
        .env("LEXNUM_MAX_PESOS", "100")
        .args(["convert", "101"])
        .assert()
        .failure();

    lexnum()
        .args(["convert", "--max-pesos", "1000000000000", "1000000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UN BILLÓN PESOS"));
}

#[test]
fn test_convert_requires_an_amount() {
    lexnum().arg("convert").assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// EXCEL AND COLUMNS COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_excel_default_output_path() {
    let dir = TempDir::new().unwrap();
    let input = amounts_workbook(dir.path());

    lexnum()
        .args(["excel", input.to_str().unwrap(), "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conversion Complete"))
        .stdout(predicate::str::contains("no es número"));

    let output = dir.path().join("montos_texto.xlsx");
    let sheet = ExcelImporter::from_path(&output).unwrap();
    assert_eq!(sheet.headers, vec!["Número", "Texto", "Error"]);
    assert_eq!(
        sheet.rows[0][1],
        RawValue::Text("MIL TRESCIENTOS VEINTE PESOS 00/100 M.N.".to_string())
    );
    assert_eq!(
        sheet.rows[2][1],
        RawValue::Text("UN PESO 00/100 M.N.".to_string())
    );
}

#[test]
fn test_excel_explicit_output_and_missing_column() {
    let dir = TempDir::new().unwrap();
    let input = amounts_workbook(dir.path());
    let output = dir.path().join("salida.xlsx");

    lexnum()
        .args([
            "excel",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--column",
            "Importe",
        ])
        .assert()
        .failure();
    assert!(!output.exists());

    lexnum()
        .args(["excel", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn test_columns_marks_detected_column() {
    let dir = TempDir::new().unwrap();
    let input = amounts_workbook(dir.path());

    lexnum()
        .args(["columns", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Número"))
        .stdout(predicate::str::contains("amount column"));
}
