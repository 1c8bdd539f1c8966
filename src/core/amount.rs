//! Exact monetary amounts and input normalization
//!
//! Every external representation (cell text, JSON number, spreadsheet float)
//! goes through a decimal string before it is split, so the fraction is never
//! computed with binary float arithmetic.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::converter::HARD_MAX_PESOS;
use crate::error::{LexNumError, LexNumResult};

/// Decorations removed before parsing. Order matters: "MXN" and "M.N." go
/// before "MN".
const CURRENCY_DECORATIONS: [&str; 5] = ["$", "MXN", "M.N.", "MN", ","];

/// Digits of `HARD_MAX_PESOS`; anything longer is out of range without parsing.
const MAX_INTEGER_DIGITS: usize = 18;

/// Cents plus the rounding digit.
const FRACTION_DIGITS: usize = 3;

static AMOUNT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("amount pattern is valid")
});

/// Non-negative amount held as whole pesos plus cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Amount {
    pesos: u64,
    cents: u8,
}

impl Amount {
    /// Build from signed operands, checking the engine contract.
    pub fn new(pesos: i64, cents: i64) -> LexNumResult<Self> {
        if pesos < 0 || cents < 0 {
            return Err(LexNumError::Range(format!(
                "negative amounts are not supported ({} pesos, {} cents)",
                pesos, cents
            )));
        }
        if cents > 99 {
            return Err(LexNumError::Format(format!(
                "cents must be between 0 and 99, got {}",
                cents
            )));
        }
        Self::from_parts(pesos as u64, cents as u8)
    }

    pub fn from_parts(pesos: u64, cents: u8) -> LexNumResult<Self> {
        if cents > 99 {
            return Err(LexNumError::Format(format!(
                "cents must be between 0 and 99, got {}",
                cents
            )));
        }
        if pesos > HARD_MAX_PESOS {
            return Err(LexNumError::Range(format!(
                "{} pesos is beyond the largest supported amount",
                pesos
            )));
        }
        Ok(Self { pesos, cents })
    }

    pub fn pesos(&self) -> u64 {
        self.pesos
    }

    pub fn cents(&self) -> u8 {
        self.cents
    }

    /// Parse a user-supplied value such as `"$1,523.45"` or `"1320.00 MXN"`.
    ///
    /// Returns `Ok(None)` when nothing is left after removing decorations,
    /// which callers treat as a blank cell.
    pub fn parse(raw: &str) -> LexNumResult<Option<Self>> {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return Ok(None);
        }
        if !AMOUNT_LITERAL.is_match(&cleaned) {
            return Err(LexNumError::Format(format!(
                "'{}' is not a numeric amount",
                raw.trim()
            )));
        }

        let (mantissa, exponent) = match cleaned.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => (&cleaned[..idx], Some(&cleaned[idx + 1..])),
            None => (cleaned.as_str(), None),
        };

        let literal = plain_literal(raw, mantissa, exponent)?;
        let parsed = Decimal::from_str(&literal).map_err(|e| {
            LexNumError::Format(format!("'{}' is not a numeric amount: {}", raw.trim(), e))
        })?;

        Self::from_decimal(parsed).map(Some)
    }

    /// Round half-up to cents and split.
    pub fn from_decimal(value: Decimal) -> LexNumResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(LexNumError::Range(format!(
                "negative amounts are not supported ({})",
                value
            )));
        }

        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let whole = rounded.trunc();
        let fraction = ((rounded - whole) * Decimal::ONE_HUNDRED).trunc();

        let pesos = whole
            .to_u64()
            .ok_or_else(|| out_of_range(&value.to_string()))?;
        let cents = fraction.to_u8().ok_or_else(|| {
            LexNumError::Format(format!("could not extract cents from {}", value))
        })?;

        Self::from_parts(pesos, cents)
    }

    /// Spreadsheet and JSON floats. Formatted with the shortest round-trip
    /// representation (`1320.0` → `"1320"`) and parsed as a decimal string.
    pub fn from_f64(value: f64) -> LexNumResult<Self> {
        if !value.is_finite() {
            return Err(LexNumError::Format(format!(
                "{} is not a finite amount",
                value
            )));
        }
        if value < 0.0 {
            return Err(LexNumError::Range(format!(
                "negative amounts are not supported ({})",
                value
            )));
        }
        Self::parse(&value.to_string())?
            .ok_or_else(|| LexNumError::Format(format!("{} produced an empty amount", value)))
    }

    pub fn from_i64(value: i64) -> LexNumResult<Self> {
        Self::new(value, 0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.pesos, self.cents)
    }
}

impl FromStr for Amount {
    type Err = LexNumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)?.ok_or_else(|| LexNumError::Format("empty amount".to_string()))
    }
}

fn clean(raw: &str) -> String {
    let mut value = raw.trim().to_string();
    for decoration in CURRENCY_DECORATIONS {
        value = value.replace(decoration, "");
    }
    value.retain(|c| !c.is_whitespace());
    value
}

/// Rewrite a matched literal as plain `whole[.fff]` with the exponent applied
/// and at most [`FRACTION_DIGITS`] fractional digits, which is all half-up
/// rounding to cents looks at. Magnitude is judged on the digits alone, so
/// exponents of any size are classified without building a `Decimal`.
fn plain_literal(raw: &str, mantissa: &str, exponent: Option<&str>) -> LexNumResult<String> {
    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", int_part, frac_part);
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok("0".to_string());
    }
    if negative {
        return Err(LexNumError::Range(format!(
            "negative amounts are not supported ({})",
            raw.trim()
        )));
    }

    // An exponent too long for i64 is still unambiguous about its direction.
    let shift = match exponent {
        Some(exp) => exp.parse::<i64>().unwrap_or(if exp.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }),
        None => 0,
    };
    let leading_zeros = (digits.len() - significant.len()) as i64;
    // Position of the decimal point counted from the first significant digit.
    let point = (int_part.len() as i64 - leading_zeros).saturating_add(shift);
    if point > MAX_INTEGER_DIGITS as i64 {
        return Err(out_of_range(raw));
    }

    let (whole, fraction) = if point <= 0 {
        let zeros = usize::try_from(point.unsigned_abs())
            .unwrap_or(usize::MAX)
            .min(FRACTION_DIGITS);
        ("0".to_string(), format!("{}{}", "0".repeat(zeros), significant))
    } else {
        let point = point as usize;
        if point >= significant.len() {
            (
                format!("{}{}", significant, "0".repeat(point - significant.len())),
                String::new(),
            )
        } else {
            (significant[..point].to_string(), significant[point..].to_string())
        }
    };

    let fraction: String = fraction.chars().take(FRACTION_DIGITS).collect();
    if fraction.is_empty() {
        Ok(whole)
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

fn out_of_range(raw: &str) -> LexNumError {
    LexNumError::Range(format!(
        "'{}' exceeds the largest supported amount",
        raw.trim()
    ))
}
