//! Number-to-words engine
//!
//! Decompose → look up → compose. The integer part is split into blocks of
//! 10^6 (long scale), each block into two base-1000 triplets, and every
//! triplet is rendered from the tables in [`super::lexicon`].

use super::amount::Amount;
use super::lexicon::{
    CENTS_DENOMINATOR, CURRENCY_PLURAL, CURRENCY_SINGULAR, CURRENCY_SUFFIX, HUNDREDS,
    HUNDRED_EXACT, SCALES, TEENS, TENS, TENS_JOINER, THOUSAND, TWENTIES, TWENTY_ONE_APOCOPE,
    UNITS, UNIT_ONE_APOCOPE,
};
use crate::error::{LexNumError, LexNumResult};

/// Ceiling used when nothing else is configured.
pub const DEFAULT_MAX_PESOS: u64 = 999_999_999;

/// Largest ceiling a converter accepts. Fits the `i64` operands of [`Converter::convert`].
pub const HARD_MAX_PESOS: u64 = 999_999_999_999_999_999;

const BLOCK: u64 = 1_000_000;

/// Converts exact amounts into formal Spanish currency text.
///
/// Holds only the configured ceiling, so it is `Copy` and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    max_pesos: u64,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            max_pesos: DEFAULT_MAX_PESOS,
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with a custom ceiling on the integer part.
    pub fn with_max_pesos(max_pesos: u64) -> LexNumResult<Self> {
        if max_pesos > HARD_MAX_PESOS {
            return Err(LexNumError::Config(format!(
                "max_pesos {} exceeds the largest nameable amount {}",
                max_pesos, HARD_MAX_PESOS
            )));
        }
        Ok(Self { max_pesos })
    }

    pub fn max_pesos(&self) -> u64 {
        self.max_pesos
    }

    /// Convert an exact `(pesos, cents)` pair.
    ///
    /// Negative operands and pesos above the ceiling fail with
    /// [`LexNumError::Range`]; cents above 99 fail with [`LexNumError::Format`].
    pub fn convert(&self, pesos: i64, cents: i64) -> LexNumResult<String> {
        let amount = Amount::new(pesos, cents)?;
        self.convert_amount(&amount)
    }

    pub fn convert_amount(&self, amount: &Amount) -> LexNumResult<String> {
        if amount.pesos() > self.max_pesos {
            return Err(LexNumError::Range(format!(
                "{} exceeds the maximum supported amount of {} pesos",
                amount, self.max_pesos
            )));
        }
        Ok(render(amount))
    }

    /// Normalize a raw textual value and convert it. Blank input yields `None`.
    pub fn convert_str(&self, raw: &str) -> LexNumResult<Option<String>> {
        match Amount::parse(raw)? {
            Some(amount) => self.convert_amount(&amount).map(Some),
            None => Ok(None),
        }
    }

    pub fn convert_f64(&self, value: f64) -> LexNumResult<String> {
        let amount = Amount::from_f64(value)?;
        self.convert_amount(&amount)
    }
}

/// Convert with the default ceiling.
pub fn convert(pesos: i64, cents: i64) -> LexNumResult<String> {
    Converter::default().convert(pesos, cents)
}

fn render(amount: &Amount) -> String {
    let pesos = amount.pesos();
    // "UN PESO": the only case where the noun is singular.
    let (words, currency) = if pesos == 1 {
        (UNIT_ONE_APOCOPE.to_string(), CURRENCY_SINGULAR)
    } else {
        (integer_to_words(pesos), CURRENCY_PLURAL)
    };
    format!(
        "{} {} {:02}/{} {}",
        words,
        currency,
        amount.cents(),
        CENTS_DENOMINATOR,
        CURRENCY_SUFFIX
    )
}

/// Cardinal words for a whole number, in stand-alone form.
///
/// ```
/// use lexnum::core::integer_to_words;
///
/// assert_eq!(integer_to_words(21_000), "VEINTIÚN MIL");
/// assert_eq!(integer_to_words(101), "CIENTO UNO");
/// ```
pub fn integer_to_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let mut blocks = Vec::with_capacity(SCALES.len());
    let mut rest = n;
    while rest > 0 {
        blocks.push(rest % BLOCK);
        rest /= BLOCK;
    }

    let mut parts: Vec<String> = Vec::new();
    for (scale, &value) in blocks.iter().enumerate().rev() {
        if value == 0 {
            continue;
        }
        if scale == 0 {
            parts.push(block_words(value, false));
            continue;
        }
        let (singular, plural) = SCALES[scale];
        if value == 1 {
            parts.push(format!("{} {}", UNIT_ONE_APOCOPE, singular));
        } else {
            parts.push(format!("{} {}", block_words(value, true), plural));
        }
    }

    parts.join(" ")
}

/// Words for a value below one million. `apocope` applies to the final
/// triplet when a noun (a scale word) follows the block.
fn block_words(value: u64, apocope: bool) -> String {
    let thousands = (value / 1000) as u16;
    let units = (value % 1000) as u16;

    let mut parts: Vec<String> = Vec::with_capacity(3);
    match thousands {
        0 => {}
        1 => parts.push(THOUSAND.to_string()),
        t => {
            parts.push(triplet_words(t, true));
            parts.push(THOUSAND.to_string());
        }
    }
    if units > 0 {
        parts.push(triplet_words(units, apocope));
    }

    parts.join(" ")
}

/// Words for 1..=999.
fn triplet_words(n: u16, apocope: bool) -> String {
    if n == 100 {
        return HUNDRED_EXACT.to_string();
    }

    let hundreds = (n / 100) as usize;
    let rest = n % 100;

    let mut parts: Vec<&str> = Vec::with_capacity(4);
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds]);
    }
    if rest > 0 {
        push_below_hundred(&mut parts, rest, apocope);
    }

    parts.join(" ")
}

fn push_below_hundred(parts: &mut Vec<&'static str>, n: u16, apocope: bool) {
    let n = n as usize;
    match n {
        1..=9 => parts.push(unit_word(n, apocope)),
        10..=19 => parts.push(TEENS[n - 10]),
        21 if apocope => parts.push(TWENTY_ONE_APOCOPE),
        20..=29 => parts.push(TWENTIES[n - 20]),
        _ => {
            parts.push(TENS[n / 10]);
            if n % 10 > 0 {
                parts.push(TENS_JOINER);
                parts.push(unit_word(n % 10, apocope));
            }
        }
    }
}

fn unit_word(digit: usize, apocope: bool) -> &'static str {
    if digit == 1 && apocope {
        UNIT_ONE_APOCOPE
    } else {
        UNITS[digit]
    }
}
