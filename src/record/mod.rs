//! Canonical records and the schema-evolution adapter.
//!
//! This subsystem owns the stable record shape callers see, independent of
//! physical format and spec version: typed values, defaults for fields
//! older data does not carry, rename reconciliation, and row-level
//! failure semantics.

mod adapter;
mod errors;
mod value;

pub use adapter::{CanonicalRecord, SchemaAdapter};
pub use errors::{CoerceError, RowError};
pub use value::{coerce, Value};
