//! Registry-level load errors.
//!
//! A load is all-or-nothing: one bad entry fails the whole attempt, so a
//! partially correct registry is never served.

use thiserror::Error;

use crate::spec::SpecError;

/// Result type for index loads.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while building a [`SpecIndex`](super::SpecIndex).
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The registry location cannot be enumerated.
    #[error("cannot enumerate registry: {0}")]
    Registry(String),

    /// One entry cannot be fetched from the registry.
    #[error("cannot read spec entry '{entry}': {detail}")]
    Unreadable { entry: String, detail: String },

    /// One entry is structurally invalid.
    #[error("invalid spec entry '{entry}': {detail}")]
    Invalid {
        entry: String,
        #[source]
        detail: SpecError,
    },
}

impl LoadError {
    pub(crate) fn invalid(entry: impl Into<String>, detail: SpecError) -> Self {
        Self::Invalid {
            entry: entry.into(),
            detail,
        }
    }
}
