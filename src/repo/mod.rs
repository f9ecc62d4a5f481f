//! The repository facade: load, resolve, open, reload.
//!
//! # Design Principles
//!
//! - One handle per registry; everything else hangs off it
//! - Reload is atomic and never disturbs open streams
//! - Row-level trouble stays row-level; only source failures end a stream

mod errors;
mod repository;
mod stream;

pub use errors::{OpenError, RecordError};
pub use repository::{OpenOptions, Repository};
pub use stream::RecordStream;
