//! Error types for the wide case table.

/// Failures while reading the wide per-date table.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("Identifier column not found in header: {0}")]
    MissingColumn(&'static str),
    #[error("Date column header {header:?} does not match %m/%d/%y")]
    InvalidDateHeader {
        header: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Row {row}: value {value:?} in column {column:?} is not a non-negative integer")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Row {row}: coordinate {value:?} in column {column:?} is not a number")]
    InvalidCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("Wrapped csv error: {0}")]
    Csv(#[from] csv::Error),
}
