//! Schema Evolution Tests
//!
//! The customer-export lineage end to end: two overlapping entries for
//! the same file family, an old layout without an email column and a
//! current layout that added one with a default. Consumers always see
//! the canonical record shape of whichever entry governs the file.

use std::fs;

use filespec::record::Value;
use filespec::repo::Repository;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// =============================================================================
// Fixture
// =============================================================================

/// Registry with the customer-export lineage:
/// - `customers_2019`: files dated before 2019-02, no email column
/// - `customers`: everything else, email defaults to empty string
fn customer_registry() -> TempDir {
    let specs = TempDir::new().unwrap();
    fs::write(
        specs.path().join("customers_2019.json"),
        br#"{
            "file_pattern": "customer-export-*.csv",
            "date_pattern": "-(\\d{4}-\\d{2})\\.csv$",
            "valid_until": "2019-02-01",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "name", "type": "string" }
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        specs.path().join("customers.json"),
        br#"{
            "file_pattern": "customer-export-*.csv",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "name", "type": "string" },
                { "name": "email", "type": "string", "default": "" }
            ]
        }"#,
    )
    .unwrap();
    specs
}

// =============================================================================
// Lineage Scenarios
// =============================================================================

/// A January 2019 file resolves to the old entry; records carry only the
/// fields that layout declares.
#[test]
fn test_old_file_served_through_old_layout() {
    let specs = customer_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("customer-export-2019-01.csv");
    fs::write(&file, "id,name\n1,Ada\n2,Grace\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let stream = repo.open(&file).unwrap();
    assert_eq!(stream.spec().id, "customers_2019");

    let records: Vec<_> = stream.map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("id"), Some(&Value::Int(1)));
    assert_eq!(records[0].get("name"), Some(&Value::Str("Ada".into())));
    assert!(!records[0].contains("email"));
}

/// A May 2019 file falls outside the old window and resolves to the
/// current entry; the missing email column is filled from the default
/// and id still coerces to an integer.
#[test]
fn test_new_file_gets_defaulted_email() {
    let specs = customer_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("customer-export-2019-05.csv");
    fs::write(&file, "id,name\n7,Grace\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let stream = repo.open(&file).unwrap();
    assert_eq!(stream.spec().id, "customers");

    let records: Vec<_> = stream.map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("id"), Some(&Value::Int(7)));
    assert_eq!(records[0].get("name"), Some(&Value::Str("Grace".into())));
    assert_eq!(records[0].get("email"), Some(&Value::Str(String::new())));
}

/// A file that actually carries the email column keeps its own values;
/// the default only fills absence.
#[test]
fn test_present_email_column_wins_over_default() {
    let specs = customer_registry();
    let data = TempDir::new().unwrap();
    let file = data.path().join("customer-export-2020-03.csv");
    fs::write(&file, "id,name,email\n9,Alan,alan@example.com\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let records: Vec<_> = repo.open(&file).unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(
        records[0].get("email"),
        Some(&Value::Str("alan@example.com".into()))
    );
}

// =============================================================================
// Renames
// =============================================================================

/// A renamed field accepts its old column name; consumers only ever see
/// the canonical name.
#[test]
fn test_renamed_column_surfaces_under_canonical_name() {
    let specs = TempDir::new().unwrap();
    fs::write(
        specs.path().join("accounts.json"),
        br#"{
            "file_pattern": "accounts-*.csv",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "email", "type": "string", "status": "renamed-from:mail_address" }
            ]
        }"#,
    )
    .unwrap();
    let data = TempDir::new().unwrap();
    let file = data.path().join("accounts-1.csv");
    fs::write(&file, "id,mail_address\n1,old@example.com\n").unwrap();

    let repo = Repository::from_dir(specs.path()).unwrap();
    let records: Vec<_> = repo.open(&file).unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(
        records[0].get("email"),
        Some(&Value::Str("old@example.com".into()))
    );
    assert!(!records[0].contains("mail_address"));
    let names: Vec<&str> = records[0].names().collect();
    assert_eq!(names, vec!["id", "email"]);
}
