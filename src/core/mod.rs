//! Number-to-words conversion engine

pub mod amount;
pub mod batch;
pub mod converter;
pub mod lexicon;

pub use amount::Amount;
pub use batch::{convert_batch, convert_value, BatchReport, RawValue, RowOutcome, RowStatus};
pub use converter::{convert, integer_to_words, Converter, DEFAULT_MAX_PESOS, HARD_MAX_PESOS};
