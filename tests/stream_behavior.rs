//! Record Stream Behavior Tests
//!
//! - Bad rows are reported in place and the stream keeps going
//! - Streams opened before a reload keep their original layout
//! - Every built-in format feeds the same canonical record shape

use std::fs;

use filespec::record::{RowError, Value};
use filespec::repo::{OpenOptions, RecordError, Repository};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_spec(specs: &TempDir, name: &str, body: &str) {
    fs::write(specs.path().join(format!("{name}.json")), body).unwrap();
}

fn orders_registry() -> TempDir {
    let specs = TempDir::new().unwrap();
    write_spec(
        &specs,
        "orders",
        r#"{
            "file_pattern": "orders-*.csv",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "total", "type": "float" }
            ]
        }"#,
    );
    specs
}

// =============================================================================
// Partial Failure
// =============================================================================

/// Five rows with one bad value: four records come through, the bad row
/// is reported as a row error at its position, nothing after it is lost.
#[test]
fn test_bad_row_reported_stream_continues() {
    let specs = orders_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("orders-1.csv");
    fs::write(&file, "id,total\n1,9.5\n2,1.0\nthree,2.0\n4,4.25\n5,0.5\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let mut stream = repo.open(&file).unwrap();

    let mut good = Vec::new();
    let mut bad = Vec::new();
    for item in &mut stream {
        match item {
            Ok(record) => good.push(record),
            Err(e) => bad.push(e),
        }
    }

    assert_eq!(good.len(), 4);
    assert_eq!(bad.len(), 1);
    assert!(matches!(
        &bad[0],
        RecordError::Row(RowError::TypeMismatch { field, raw, .. })
            if field == "id" && raw == "three"
    ));
    assert_eq!(good.last().unwrap().get("id"), Some(&Value::Int(5)));
    assert_eq!(stream.position(), 5);
}

/// A missing required cell rejects only its own row.
#[test]
fn test_missing_required_cell_rejects_one_row() {
    let specs = orders_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("orders-2.csv");
    fs::write(&file, "id,total\n1,9.5\n2,\n3,1.0\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let results: Vec<_> = repo.open(&file).unwrap().collect();

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(
        &results[1],
        Err(RecordError::Row(RowError::MissingRequiredField(f))) if f == "total"
    ));
    assert!(results[2].is_ok());
}

// =============================================================================
// Strict Mode
// =============================================================================

#[test]
fn test_strict_mode_rejects_unknown_columns() {
    let specs = orders_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("orders-3.csv");
    fs::write(&file, "id,total,surprise\n1,9.5,x\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();

    // Lenient: the extra column is dropped.
    let lenient: Vec<_> = repo.open(&file).unwrap().collect();
    assert!(lenient[0].is_ok());

    let strict: Vec<_> = repo.open_with(&file, OpenOptions::new().strict()).unwrap().collect();
    assert!(matches!(
        &strict[0],
        Err(RecordError::Row(RowError::UnknownField(f))) if f == "surprise"
    ));
}

// =============================================================================
// Reload Isolation
// =============================================================================

/// A stream opened before a reload keeps yielding under the layout it
/// resolved; only subsequent opens see the new one.
#[test]
fn test_open_stream_unaffected_by_reload() {
    let specs = orders_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("orders-4.csv");
    fs::write(&file, "id,total\n1,9.5\n2,1.0\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let mut stream = repo.open(&file).unwrap();
    assert!(stream.next().unwrap().is_ok());

    // Swap in a layout that these files cannot satisfy.
    write_spec(
        &specs,
        "orders",
        r#"{
            "file_pattern": "orders-*.csv",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "total", "type": "float" },
                { "name": "currency", "type": "string" }
            ]
        }"#,
    );
    repo.reload().unwrap();

    // The open stream still finishes cleanly under the old layout.
    assert!(stream.next().unwrap().is_ok());
    assert!(stream.next().is_none());

    // A fresh open resolves the new layout and rejects the rows.
    let fresh: Vec<_> = repo.open(&file).unwrap().collect();
    assert!(matches!(
        &fresh[0],
        Err(RecordError::Row(RowError::MissingRequiredField(f))) if f == "currency"
    ));
}

// =============================================================================
// Formats
// =============================================================================

/// JSONL files feed the same record shape as delimited ones.
#[test]
fn test_jsonl_source() {
    let specs = TempDir::new().unwrap();
    write_spec(
        &specs,
        "events",
        r#"{
            "file_pattern": "events-*.jsonl",
            "format": { "kind": "jsonl" },
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "kind", "type": "string" },
                { "name": "flagged", "type": "bool", "required": false }
            ]
        }"#,
    );
    let data = TempDir::new().unwrap();
    let file = data.path().join("events-1.jsonl");
    fs::write(
        &file,
        concat!(
            "{\"id\": 1, \"kind\": \"login\", \"flagged\": true}\n",
            "\n",
            "{\"id\": 2, \"kind\": \"logout\"}\n",
        ),
    )
    .unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let records: Vec<_> = repo.open(&file).unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("flagged"), Some(&Value::Bool(true)));
    assert_eq!(records[1].get("flagged"), Some(&Value::Null));
}

/// Fixed-width files slice columns by declared widths; values arrive
/// trimmed and typed.
#[test]
fn test_fixed_width_source() {
    let specs = TempDir::new().unwrap();
    write_spec(
        &specs,
        "balances",
        r#"{
            "file_pattern": "balances-*.dat",
            "format": { "kind": "fixed-width", "skip_rows": 1, "columns": [
                { "name": "account", "width": 8 },
                { "name": "balance", "width": 10 }
            ] },
            "fields": [
                { "name": "account", "type": "string" },
                { "name": "balance", "type": "float" }
            ]
        }"#,
    );
    let data = TempDir::new().unwrap();
    let file = data.path().join("balances-2021.dat");
    fs::write(
        &file,
        "ACCOUNT BALANCE   \nAC-0001      10.50\nAC-0002     200.00\n",
    )
    .unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let records: Vec<_> = repo.open(&file).unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("account"), Some(&Value::Str("AC-0001".into())));
    assert_eq!(records[1].get("balance"), Some(&Value::Float(200.0)));
}

/// Semicolon-delimited, headerless files name cells from the declared
/// field order.
#[test]
fn test_headerless_delimited_source() {
    let specs = TempDir::new().unwrap();
    write_spec(
        &specs,
        "rates",
        r#"{
            "file_pattern": "rates-*.txt",
            "format": { "kind": "delimited", "delimiter": ";", "has_header": false },
            "fields": [
                { "name": "currency", "type": "string" },
                { "name": "rate", "type": "float" }
            ]
        }"#,
    );
    let data = TempDir::new().unwrap();
    let file = data.path().join("rates-1.txt");
    fs::write(&file, "EUR;1.08\nGBP;1.27\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let records: Vec<_> = repo.open(&file).unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("currency"), Some(&Value::Str("EUR".into())));
    assert_eq!(records[1].get("rate"), Some(&Value::Float(1.27)));
}
