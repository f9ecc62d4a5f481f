//! Specification registry access and the in-memory index.
//!
//! # Design Principles
//!
//! - Load is all-or-nothing; a partially correct registry is never served
//! - The index is immutable once built; reload builds a replacement
//! - Registry order is stable and author-visible, it drives tie-breaking

mod errors;
#[allow(clippy::module_inception)]
mod index;
mod registry;

pub use errors::{LoadError, LoadResult};
pub use index::{Candidate, SpecIndex};
pub use registry::{DirRegistry, SpecRegistry};
