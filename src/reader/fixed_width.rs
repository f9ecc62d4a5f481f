//! Fixed-width reader.
//!
//! Lines are sliced into cells by the byte widths declared in the format
//! parameters; cell values are trimmed of padding. A line shorter than the
//! declared layout, or a column boundary that splits a multi-byte
//! character, is structural corruption.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::spec::{FixedColumn, FormatParams, SpecDefinition};

use super::dispatch::FormatReader;
use super::errors::{ReadError, ReadResult};
use super::raw::{RawRow, RawRows};

/// Reader for fixed-width column files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWidthReader;

impl FormatReader for FixedWidthReader {
    fn rows(&self, path: &Path, spec: &SpecDefinition) -> ReadResult<RawRows> {
        let FormatParams::FixedWidth {
            columns,
            skip_rows,
            comment,
        } = &spec.format
        else {
            return Err(ReadError::FormatMismatch {
                spec: spec.id.clone(),
                expected: "fixed-width",
            });
        };

        let file = File::open(path).map_err(|e| ReadError::open(path, e))?;
        let lines = BufReader::new(file).lines();

        let columns = columns.clone();
        let comment = comment.clone();
        let skip = *skip_rows;

        Ok(Box::new(
            lines
                .enumerate()
                .skip(skip)
                .filter_map(move |(i, line)| {
                    let line_no = i + 1;
                    match line {
                        Err(e) => Some(Err(ReadError::corrupt(format!(
                            "I/O error at line {line_no}: {e}"
                        )))),
                        Ok(text) => {
                            if text.trim().is_empty() {
                                return None;
                            }
                            if let Some(prefix) = &comment {
                                if text.starts_with(prefix.as_str()) {
                                    return None;
                                }
                            }
                            Some(slice_line(line_no, &text, &columns))
                        }
                    }
                }),
        ))
    }
}

fn slice_line(line_no: usize, line: &str, columns: &[FixedColumn]) -> Result<RawRow, ReadError> {
    let total: usize = columns.iter().map(|c| c.width).sum();
    if line.len() < total {
        return Err(ReadError::corrupt(format!(
            "line {line_no}: {} bytes, layout needs {total}",
            line.len()
        )));
    }

    let mut row = RawRow::new();
    let mut offset = 0;
    for column in columns {
        let end = offset + column.width;
        let cell = line.get(offset..end).ok_or_else(|| {
            ReadError::corrupt(format!(
                "line {line_no}: column '{}' boundary splits a multi-byte character",
                column.name
            ))
        })?;
        row.push(column.name.as_str(), cell.trim());
        offset = end;
    }
    Ok(row)
}
