//! Error types for the sentiment engine

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("No text column found")]
    NoTextColumnFound,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::str::Utf8Error> for SentimentError {
    fn from(err: std::str::Utf8Error) -> Self {
        SentimentError::Input(format!("text is not valid UTF-8: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SentimentError>;

/// Why a single batch row was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// The analysis column is absent from the row
    MissingColumn,
    /// The cell holds bytes that cannot be read as text
    Undecodable,
    /// The scorer rejected the cell text
    Scoring,
}

/// A failure attached to one batch row. The rest of the batch is unaffected.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("Row {row} ({column}): {message}")]
pub struct RowProcessingError {
    /// Zero-based index of the row in the input
    pub row: usize,
    pub column: String,
    pub kind: RowErrorKind,
    pub message: String,
}

impl RowProcessingError {
    pub fn missing_column(row: usize, column: &str) -> Self {
        Self {
            row,
            column: column.to_string(),
            kind: RowErrorKind::MissingColumn,
            message: format!("column '{}' is missing", column),
        }
    }

    pub fn undecodable(row: usize, column: &str) -> Self {
        Self {
            row,
            column: column.to_string(),
            kind: RowErrorKind::Undecodable,
            message: "cell is not valid UTF-8".to_string(),
        }
    }

    pub fn scoring(row: usize, column: &str, err: &SentimentError) -> Self {
        Self {
            row,
            column: column.to_string(),
            kind: RowErrorKind::Scoring,
            message: err.to_string(),
        }
    }
}
