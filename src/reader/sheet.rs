//! Spreadsheet reading hook.
//!
//! Concrete spreadsheet parsing is an external collaborator's concern:
//! the core only requires that a sheet can be turned into raw rows.
//! Embedders register a [`SheetReader`] on the
//! [`ReaderSet`](super::ReaderSet); sheet specs fail to open while none is
//! registered.

use std::path::Path;

use crate::spec::SheetSelector;

use super::errors::ReadResult;
use super::raw::RawRows;

/// Produces raw rows from one sheet of a spreadsheet file.
///
/// `skip_rows` counts leading sheet rows to drop before the header row,
/// mirroring the other formats. The first remaining row names the cells.
pub trait SheetReader: Send + Sync {
    fn rows(&self, path: &Path, sheet: &SheetSelector, skip_rows: usize) -> ReadResult<RawRows>;
}
