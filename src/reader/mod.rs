//! Format readers.
//!
//! One variant per physical format, all producing the same thing: a lazy,
//! finite, non-restartable sequence of raw rows. Corruption is file-level
//! and aborts the sequence; it is never downgraded to a row problem.

mod delimited;
mod dispatch;
mod errors;
mod fixed_width;
mod jsonl;
mod raw;
mod sheet;

pub use delimited::DelimitedReader;
pub use dispatch::{FormatReader, ReaderSet};
pub use errors::{ReadError, ReadResult};
pub use fixed_width::FixedWidthReader;
pub use jsonl::JsonlReader;
pub use raw::{RawRow, RawRows};
pub use sheet::SheetReader;
