//! Resolution: selecting the single specification governing a path.
//!
//! # Design Principles
//!
//! - Deterministic: same path, same index generation, same answer
//! - Pure: no side effects, no internal caching
//! - Never guesses: a tie that survives every priority rule is an error

mod errors;
mod resolver;

pub use errors::{ResolutionError, ResolveResult};
pub use resolver::{resolve, resolve_at};
