//! Errors surfaced by the repository facade.

use thiserror::Error;

use crate::reader::ReadError;
use crate::record::RowError;
use crate::resolve::ResolutionError;

/// Why a file could not be opened as a record stream.
#[derive(Debug, Error)]
pub enum OpenError {
    /// No single spec governs the path.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The file could not be opened through its format reader.
    #[error(transparent)]
    Read(#[from] ReadError),
}

/// A per-item failure inside an open record stream.
///
/// Row errors reject one row and the stream continues; read errors mean
/// the source itself failed and the stream ends after reporting it.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

impl RecordError {
    /// Returns true for errors that terminate the stream.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordError::Read(_))
    }
}
