use thiserror::Error;

pub type LexNumResult<T> = Result<T, LexNumError>;

#[derive(Error, Debug)]
pub enum LexNumError {
    /// Amount is negative or its integer part exceeds the configured ceiling.
    #[error("Range error: {0}")]
    Range(String),

    /// Value cannot be read as a two-decimal monetary amount.
    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No header in the sheet matches the amount column.
    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LexNumError {
    /// True for errors that belong to a single value rather than the whole request.
    pub fn is_value_error(&self) -> bool {
        matches!(self, LexNumError::Range(_) | LexNumError::Format(_))
    }
}
