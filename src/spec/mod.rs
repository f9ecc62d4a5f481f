//! File specification model.
//!
//! A specification binds a file-matching rule to a record schema and a
//! physical format. Specs are authored independently, may overlap, and may
//! be valid only for a date range; the resolver decides which one governs
//! a given file.

mod errors;
mod parser;
mod pattern;
mod types;

pub use errors::{SpecError, SpecResult};
pub use parser::{JsonSpecParser, SpecParser};
pub use pattern::{parse_date_token, MatchRule};
pub use types::{
    FieldSpec, FieldStatus, FieldType, FixedColumn, FormatParams, SheetSelector, SpecDefinition,
    ValidityWindow, DEFAULT_DATE_FORMAT,
};
