//! Row-level errors.
//!
//! These are recoverable by design: a bad row is surfaced alongside the
//! stream and the stream continues. One malformed record must never abort
//! an entire file read.

use thiserror::Error;

/// A raw text value that cannot be coerced into its declared type.
///
/// Carries no field name; the adapter attaches one when it folds this
/// into [`RowError::TypeMismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce '{raw}' into {expected}")]
pub struct CoerceError {
    pub expected: &'static str,
    pub raw: String,
}

/// Problems adapting a single raw row to the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// A required field is absent from the row and declares no default.
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// The raw value cannot be coerced into the field's declared type.
    #[error("field '{field}': cannot coerce '{raw}' into {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        raw: String,
    },

    /// Strict mode only: the row carries a field the schema does not know.
    #[error("unknown field '{0}'")]
    UnknownField(String),
}
