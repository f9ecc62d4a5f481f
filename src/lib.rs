//! filespec - a registry of file specifications
//!
//! Resolves data file paths to the single specification governing them,
//! then streams file contents as canonical typed records regardless of
//! the physical format (delimited text, JSONL, fixed-width, spreadsheet).

pub mod index;
pub mod reader;
pub mod record;
pub mod repo;
pub mod resolve;
pub mod spec;
