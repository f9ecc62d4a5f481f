//! Raw rows: the only shape format readers produce.
//!
//! A raw row is an ordered list of `(source name, raw text)` cells. Source
//! names come from the file itself (header row, JSON keys) or from the
//! format parameters (fixed-width columns, headerless delimited files).
//! No typing happens here; coercion is the adapter's job.

use super::errors::ReadError;

/// One raw row as produced by a format reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(name, text)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            cells: pairs.into_iter().collect(),
        }
    }

    /// Appends a cell.
    pub fn push(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.cells.push((name.into(), text.into()));
    }

    /// Returns the raw text for a source name. First occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Source names in cell order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A lazy, finite, forward-only sequence of raw rows from one open file.
pub type RawRows = Box<dyn Iterator<Item = Result<RawRow, ReadError>> + Send>;
