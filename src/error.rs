use thiserror::Error;

/// Errors that abort a render pass. None of them are recovered from: the
/// report shows the message instead of any panel after the page header.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("failed to parse CSV: expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("cannot convert {column} value '{value}' at row {row} to integer")]
    Coercion {
        column: String,
        row: usize,
        value: String,
    },
}

impl ReportError {
    /// Whether the upload itself was read into a table before the pass failed.
    pub fn after_parse(&self) -> bool {
        matches!(self, ReportError::Coercion { .. })
    }
}
