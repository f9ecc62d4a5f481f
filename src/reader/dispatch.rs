//! Format dispatch: the only place aware of physical formats.
//!
//! The resolver and the adapter never look at format parameters; a
//! [`ReaderSet`] picks the reader variant from the spec's format binding
//! and everything downstream consumes raw rows.

use std::path::Path;
use std::sync::Arc;

use crate::spec::{FormatParams, SpecDefinition};

use super::delimited::DelimitedReader;
use super::errors::{ReadError, ReadResult};
use super::fixed_width::FixedWidthReader;
use super::jsonl::JsonlReader;
use super::raw::RawRows;
use super::sheet::SheetReader;

/// A format reader variant: turns one file into a lazy sequence of raw
/// rows, driven by the spec's format parameters.
///
/// The sequence is finite and not restartable; obtaining a fresh one
/// means calling `rows` again.
pub trait FormatReader: Send + Sync {
    fn rows(&self, path: &Path, spec: &SpecDefinition) -> ReadResult<RawRows>;
}

/// The reader variants available to a repository.
///
/// Delimited, JSONL and fixed-width are built in; spreadsheet support is
/// supplied by the embedder through [`register_sheet_reader`].
///
/// [`register_sheet_reader`]: ReaderSet::register_sheet_reader
#[derive(Clone, Default)]
pub struct ReaderSet {
    sheet: Option<Arc<dyn SheetReader>>,
}

impl ReaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the spreadsheet reader.
    pub fn register_sheet_reader(&mut self, reader: Arc<dyn SheetReader>) {
        self.sheet = Some(reader);
    }

    /// Returns true if a spreadsheet reader is registered.
    pub fn has_sheet_reader(&self) -> bool {
        self.sheet.is_some()
    }

    /// Opens the file through the reader variant the spec binds.
    pub fn rows(&self, path: &Path, spec: &SpecDefinition) -> ReadResult<RawRows> {
        match &spec.format {
            FormatParams::Delimited { .. } => DelimitedReader.rows(path, spec),
            FormatParams::Jsonl => JsonlReader.rows(path, spec),
            FormatParams::FixedWidth { .. } => FixedWidthReader.rows(path, spec),
            FormatParams::Sheet { sheet, skip_rows } => match &self.sheet {
                Some(reader) => reader.rows(path, sheet, *skip_rows),
                None => Err(ReadError::NoSheetReader),
            },
        }
    }
}

impl std::fmt::Debug for ReaderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSet")
            .field("sheet", &self.sheet.is_some())
            .finish()
    }
}
