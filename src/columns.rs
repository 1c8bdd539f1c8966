//! Amount column detection
//!
//! Headers are compared after folding accents, dropping whitespace, and
//! lowercasing, so "Número", "NUMERO" and " Num " all match.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized header names recognized as the amount column.
pub const COLUMN_ALIASES: [&str; 2] = ["numero", "num"];

/// Header name of the column added with the converted text.
pub const TEXT_COLUMN: &str = "Texto";

/// Header name of the column added when some rows fail.
pub const ERROR_COLUMN: &str = "Error";

pub fn normalize_header(header: &str) -> String {
    header
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Index of the first header that looks like an amount column.
pub fn find_amount_column<S: AsRef<str>>(headers: &[S]) -> Option<usize> {
    headers
        .iter()
        .position(|h| COLUMN_ALIASES.contains(&normalize_header(h.as_ref()).as_str()))
}

/// Index of the header matching `name` under the same normalization.
pub fn find_named_column<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .position(|h| normalize_header(h.as_ref()) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Número"), "numero");
        assert_eq!(normalize_header("  Num  "), "num");
        assert_eq!(normalize_header("NÚ MERO"), "numero");
        assert_eq!(normalize_header("Importe Total"), "importetotal");
    }

    #[test]
    fn test_find_amount_column() {
        let headers = vec!["Folio", "Concepto", "Número", "Fecha"];
        assert_eq!(find_amount_column(&headers), Some(2));

        let headers = vec!["NUM", "Numero"];
        assert_eq!(find_amount_column(&headers), Some(0));
    }

    #[test]
    fn test_no_amount_column() {
        let headers = vec!["Folio", "Numeral", "Importe"];
        assert_eq!(find_amount_column(&headers), None);
        let empty: Vec<String> = Vec::new();
        assert_eq!(find_amount_column(&empty), None);
    }

    #[test]
    fn test_find_named_column() {
        let headers = vec!["Folio".to_string(), "Importe Total".to_string()];
        assert_eq!(find_named_column(&headers, "importe total"), Some(1));
        assert_eq!(find_named_column(&headers, "IMPORTETOTAL"), Some(1));
        assert_eq!(find_named_column(&headers, "monto"), None);
    }
}
