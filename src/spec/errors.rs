//! Structural errors for individual specification entries.
//!
//! A `SpecError` means a registry entry cannot be turned into a usable
//! [`SpecDefinition`](super::SpecDefinition). These are load-time failures:
//! a registry containing even one such entry is rejected wholesale.

use thiserror::Error;

/// Result type for spec parsing and validation.
pub type SpecResult<T> = Result<T, SpecError>;

/// Structural problems in a single specification entry.
#[derive(Debug, Clone, Error)]
pub enum SpecError {
    #[error("entry is not valid JSON: {0}")]
    Json(String),

    #[error("entry declares no file pattern")]
    NoPattern,

    #[error("invalid file pattern '{pattern}': {detail}")]
    Pattern { pattern: String, detail: String },

    #[error("invalid date capture regex '{regex}': {detail}")]
    DateCapture { regex: String, detail: String },

    #[error("date capture regex '{0}' has no capture group")]
    DateCaptureNoGroup(String),

    #[error("unknown field type '{0}'")]
    UnknownType(String),

    #[error("unknown field status '{0}'")]
    UnknownStatus(String),

    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("invalid default for field '{field}': {detail}")]
    InvalidDefault { field: String, detail: String },

    #[error("validity window is inverted: {from} is not before {to}")]
    InvertedWindow { from: String, to: String },

    #[error("invalid format {param} '{value}': must be a single byte")]
    InvalidFormatParam {
        param: &'static str,
        value: String,
    },

    #[error("fixed-width format declares no columns")]
    NoColumns,

    #[error("fixed-width column '{0}' has zero width")]
    ZeroWidth(String),

    #[error("duplicate spec id '{0}'")]
    DuplicateId(String),
}

impl From<serde_json::Error> for SpecError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
