//! Delimited-text reader (CSV and friends).
//!
//! Built on the `csv` crate. Cell names come from the header row when the
//! format declares one, otherwise from the spec's field names by position.
//! Preamble rows are skipped before the header is read. A structurally
//! broken file (unterminated quote, invalid UTF-8) aborts the stream with
//! a corruption error at the offending record.

use std::path::Path;

use csv::ReaderBuilder;

use crate::spec::{FormatParams, SpecDefinition};

use super::dispatch::FormatReader;
use super::errors::{ReadError, ReadResult};
use super::raw::{RawRow, RawRows};

/// Reader for delimited text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedReader;

impl FormatReader for DelimitedReader {
    fn rows(&self, path: &Path, spec: &SpecDefinition) -> ReadResult<RawRows> {
        let FormatParams::Delimited {
            delimiter,
            has_header,
            quote,
            comment,
            skip_rows,
        } = &spec.format
        else {
            return Err(ReadError::FormatMismatch {
                spec: spec.id.clone(),
                expected: "delimited",
            });
        };

        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(*delimiter)
            .quote(*quote)
            .comment(*comment)
            .has_headers(false)
            .flexible(true);

        let reader = builder
            .from_path(path)
            .map_err(|e| ReadError::open(path, e))?;
        let mut records = reader.into_records();

        for _ in 0..*skip_rows {
            match records.next() {
                None => break,
                Some(Err(e)) => return Err(ReadError::corrupt(e.to_string())),
                Some(Ok(_)) => {}
            }
        }

        let names: Vec<String> = if *has_header {
            match records.next() {
                None => Vec::new(),
                Some(Err(e)) => {
                    return Err(ReadError::corrupt(format!("bad header row: {e}")))
                }
                Some(Ok(header)) => header.iter().map(|h| h.trim().to_string()).collect(),
            }
        } else {
            spec.fields.iter().map(|f| f.name.clone()).collect()
        };

        Ok(Box::new(records.map(move |record| match record {
            Err(e) => Err(ReadError::corrupt(e.to_string())),
            Ok(record) => {
                let mut row = RawRow::new();
                // Cells beyond the named columns have no addressable name
                // and are dropped; short rows simply leave cells absent.
                for (i, cell) in record.iter().enumerate() {
                    if let Some(name) = names.get(i) {
                        row.push(name.clone(), cell);
                    }
                }
                Ok(row)
            }
        })))
    }
}
