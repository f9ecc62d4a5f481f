//! Resolution errors.
//!
//! Both variants are surfaced to the caller, never defaulted: serving a
//! file through the wrong schema silently is the one failure mode this
//! system exists to prevent.

use thiserror::Error;

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ResolutionError>;

/// Why no single spec governs a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No registered spec matches the path.
    #[error("no file specification matches '{0}'")]
    NoMatch(String),

    /// Several specs survive every priority tie-break. The registry needs
    /// fixing; guessing is not an option.
    #[error("ambiguous resolution for '{path}': candidates {candidates:?}")]
    Ambiguous {
        path: String,
        candidates: Vec<String>,
    },
}
