//! Spanish lexical tables for cardinal numbers
//!
//! All irregular forms live here as data indexed by numeric value, so the
//! converter only decomposes, looks up, and joins.

/// Cardinal units, indexed 0..=9. Index 0 is only used for a whole amount of zero.
pub const UNITS: [&str; 10] = [
    "CERO", "UNO", "DOS", "TRES", "CUATRO", "CINCO", "SEIS", "SIETE", "OCHO", "NUEVE",
];

/// 10..=19, indexed by `n - 10`.
pub const TEENS: [&str; 10] = [
    "DIEZ",
    "ONCE",
    "DOCE",
    "TRECE",
    "CATORCE",
    "QUINCE",
    "DIECISÉIS",
    "DIECISIETE",
    "DIECIOCHO",
    "DIECINUEVE",
];

/// 20..=29, indexed by `n - 20`. Fused "VEINTI" forms carry their own accents.
pub const TWENTIES: [&str; 10] = [
    "VEINTE",
    "VEINTIUNO",
    "VEINTIDÓS",
    "VEINTITRÉS",
    "VEINTICUATRO",
    "VEINTICINCO",
    "VEINTISÉIS",
    "VEINTISIETE",
    "VEINTIOCHO",
    "VEINTINUEVE",
];

/// Tens indexed by the tens digit. Slots 0..=2 are covered by the tables above.
pub const TENS: [&str; 10] = [
    "",
    "",
    "",
    "TREINTA",
    "CUARENTA",
    "CINCUENTA",
    "SESENTA",
    "SETENTA",
    "OCHENTA",
    "NOVENTA",
];

/// Hundreds indexed by the hundreds digit. 100 on its own is [`HUNDRED_EXACT`].
pub const HUNDREDS: [&str; 10] = [
    "",
    "CIENTO",
    "DOSCIENTOS",
    "TRESCIENTOS",
    "CUATROCIENTOS",
    "QUINIENTOS",
    "SEISCIENTOS",
    "SETECIENTOS",
    "OCHOCIENTOS",
    "NOVECIENTOS",
];

pub const HUNDRED_EXACT: &str = "CIEN";

/// Joiner between tens and units from 31 upwards.
pub const TENS_JOINER: &str = "Y";

/// Invariant thousand word. Never pluralizes and never takes "UN".
pub const THOUSAND: &str = "MIL";

/// Apocopated forms used when a number modifies a following noun.
pub const UNIT_ONE_APOCOPE: &str = "UN";
pub const TWENTY_ONE_APOCOPE: &str = "VEINTIÚN";

/// Long-scale words for successive powers of 10^6: (singular, plural).
/// Index 0 is the plain block below one million and has no word.
pub const SCALES: [(&str, &str); 4] = [
    ("", ""),
    ("MILLÓN", "MILLONES"),
    ("BILLÓN", "BILLONES"),
    ("TRILLÓN", "TRILLONES"),
];

pub const CURRENCY_SINGULAR: &str = "PESO";
pub const CURRENCY_PLURAL: &str = "PESOS";
pub const CURRENCY_SUFFIX: &str = "M.N.";
pub const CENTS_DENOMINATOR: u32 = 100;
