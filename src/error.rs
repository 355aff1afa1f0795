//! Error types shared across the quiz.

use thiserror::Error;

/// A word list that could not be turned into quiz entries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("file is neither UTF-8 nor Shift_JIS text")]
    Undecodable,
    #[error("file has no header row")]
    MissingHeader,
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Input rejected at a validation gate. No state changes when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("answer must be exactly 2 characters")]
    AnswerLength,
    #[error("answer must be ASCII")]
    NonAscii,
    #[error("no question is awaiting an answer")]
    NotAwaitingAnswer,
    #[error("export is only available after ending the quiz")]
    ExportUnavailable,
    #[error("enter a name before saving")]
    EmptyName,
    #[error("name cannot be used in a file name")]
    InvalidName,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to build export table: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid hour {0}, expected 0-23")]
    Hour(u32),
    #[error("open_hour and close_hour must be set together")]
    HourWindow,
    #[error("invalid UTC offset {0}h")]
    Offset(i32),
}
