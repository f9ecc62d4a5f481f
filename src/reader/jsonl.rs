//! Line-delimited structured reader: one JSON object per line.
//!
//! Cell names are the object keys. Scalar values are rendered to raw text
//! and re-typed by the adapter like any other format; `null` values count
//! as absent cells so defaults and required-ness apply uniformly. A line
//! that is not a JSON object is structural corruption, not a row error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::spec::{FormatParams, SpecDefinition};

use super::dispatch::FormatReader;
use super::errors::{ReadError, ReadResult};
use super::raw::{RawRow, RawRows};

/// Reader for line-delimited JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlReader;

impl FormatReader for JsonlReader {
    fn rows(&self, path: &Path, spec: &SpecDefinition) -> ReadResult<RawRows> {
        if !matches!(spec.format, FormatParams::Jsonl) {
            return Err(ReadError::FormatMismatch {
                spec: spec.id.clone(),
                expected: "jsonl",
            });
        }

        let file = File::open(path).map_err(|e| ReadError::open(path, e))?;
        let lines = BufReader::new(file).lines();

        Ok(Box::new(lines.enumerate().filter_map(|(i, line)| {
            let line_no = i + 1;
            match line {
                Err(e) => Some(Err(ReadError::corrupt(format!(
                    "I/O error at line {line_no}: {e}"
                )))),
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(parse_line(line_no, &text)),
            }
        })))
    }
}

fn parse_line(line_no: usize, text: &str) -> Result<RawRow, ReadError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ReadError::corrupt(format!("line {line_no}: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| ReadError::corrupt(format!("line {line_no}: expected a JSON object")))?;

    let mut row = RawRow::new();
    for (key, value) in object {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::String(s) => row.push(key, s.as_str()),
            other => row.push(key, other.to_string()),
        }
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FieldSpec, MatchRule};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn spec() -> SpecDefinition {
        let rule = MatchRule::new(&["*.jsonl".to_string()], None).unwrap();
        SpecDefinition::new("jsonl-test", rule, vec![FieldSpec::int("id")])
            .with_format(FormatParams::Jsonl)
    }

    fn write_file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_object_keys_become_cells() {
        let file = write_file("{\"id\": 7, \"name\": \"Alice\", \"active\": true}\n");
        let rows: Vec<_> = JsonlReader.rows(file.path(), &spec()).unwrap().collect();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.get("id"), Some("7"));
        assert_eq!(row.get("name"), Some("Alice"));
        assert_eq!(row.get("active"), Some("true"));
    }

    #[test]
    fn test_null_values_are_absent() {
        let file = write_file("{\"id\": 1, \"email\": null}\n");
        let rows: Vec<_> = JsonlReader.rows(file.path(), &spec()).unwrap().collect();
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.get("email"), None);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let file = write_file("{\"id\": 1}\n\n{\"id\": 2}\n");
        let rows: Vec<_> = JsonlReader.rows(file.path(), &spec()).unwrap().collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let file = write_file("{\"id\": 1}\nnot json\n");
        let rows: Vec<_> = JsonlReader.rows(file.path(), &spec()).unwrap().collect();
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(ReadError::Corrupt(_))));
    }

    #[test]
    fn test_non_object_line_is_corrupt() {
        let file = write_file("[1, 2, 3]\n");
        let rows: Vec<_> = JsonlReader.rows(file.path(), &spec()).unwrap().collect();
        assert!(matches!(rows[0], Err(ReadError::Corrupt(_))));
    }
}
