//! File-level read errors.
//!
//! Unlike row errors, these are not recoverable: a structurally broken
//! file aborts its stream, and a file that cannot be opened never yields
//! one. Corruption is never masked as a row problem.

use thiserror::Error;

/// Result type for reader operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Errors raised by format readers.
#[derive(Debug, Clone, Error)]
pub enum ReadError {
    /// The file cannot be opened at all.
    #[error("cannot open '{path}': {detail}")]
    Open { path: String, detail: String },

    /// The underlying file is structurally broken (truncated record,
    /// unterminated quote, invalid line structure). Aborts the stream.
    #[error("corrupt input: {0}")]
    Corrupt(String),

    /// A sheet spec was opened but no spreadsheet reader is registered.
    #[error("no spreadsheet reader registered")]
    NoSheetReader,

    /// The spec handed to a reader does not carry that reader's format
    /// parameters. Indicates a dispatch bug, not a data problem.
    #[error("spec '{spec}' does not carry {expected} format parameters")]
    FormatMismatch {
        spec: String,
        expected: &'static str,
    },
}

impl ReadError {
    pub(crate) fn open(path: &std::path::Path, detail: impl std::fmt::Display) -> Self {
        Self::Open {
            path: path.display().to_string(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn corrupt(detail: impl Into<String>) -> Self {
        Self::Corrupt(detail.into())
    }
}
