//! Parsing registry entries into spec definitions.
//!
//! Entries are declarative documents; nothing is executed at load time.
//! The concrete encoding sits behind [`SpecParser`] so registries can
//! carry other formats; the shipped implementation is JSON.
//!
//! A JSON entry looks like:
//!
//! ```json
//! {
//!     "file_pattern": "customer-export-*.csv",
//!     "date_pattern": "-(\\d{4}-\\d{2})\\.csv$",
//!     "valid_until": "2019-02-01",
//!     "schema_version": 2,
//!     "format": { "kind": "delimited", "delimiter": ",", "has_header": true },
//!     "fields": [
//!         { "name": "id", "type": "int" },
//!         { "name": "name", "type": "string" },
//!         { "name": "email", "type": "string", "default": "" }
//!     ]
//! }
//! ```

use chrono::NaiveDate;
use serde::Deserialize;

use super::errors::{SpecError, SpecResult};
use super::pattern::MatchRule;
use super::types::{
    FieldSpec, FieldStatus, FieldType, FixedColumn, FormatParams, SheetSelector, SpecDefinition,
    ValidityWindow, DEFAULT_DATE_FORMAT,
};
use crate::record::Value;

/// Turns one registry entry payload into a validated [`SpecDefinition`].
///
/// The entry id is assigned by the registry (it is the entry's name, not
/// part of the payload).
pub trait SpecParser: Send + Sync {
    fn parse(&self, entry_id: &str, payload: &[u8]) -> SpecResult<SpecDefinition>;
}

/// The shipped parser for JSON spec entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSpecParser;

impl SpecParser for JsonSpecParser {
    fn parse(&self, entry_id: &str, payload: &[u8]) -> SpecResult<SpecDefinition> {
        let doc: SpecPayload = serde_json::from_slice(payload)?;

        let patterns = doc.file_pattern.into_vec();
        let match_rule = MatchRule::new(&patterns, doc.date_pattern.as_deref())?;

        let mut fields = Vec::with_capacity(doc.fields.len());
        for field in doc.fields {
            fields.push(build_field(field)?);
        }

        let spec = SpecDefinition {
            id: entry_id.to_string(),
            match_rule,
            validity: ValidityWindow {
                from: doc.valid_from,
                to: doc.valid_until,
            },
            enabled: doc.enabled,
            fields,
            format: build_format(doc.format)?,
            schema_version: doc.schema_version,
        };

        spec.validate_structure()?;
        Ok(spec)
    }
}

fn build_field(payload: FieldPayload) -> SpecResult<FieldSpec> {
    let field_type = FieldType::from_name(&payload.field_type)
        .ok_or_else(|| SpecError::UnknownType(payload.field_type.clone()))?;

    let status = match payload.status.as_deref() {
        None | Some("active") => FieldStatus::Active,
        Some("deprecated") => FieldStatus::Deprecated,
        Some(s) => match s.strip_prefix("renamed-from:") {
            Some(old) if !old.is_empty() => FieldStatus::RenamedFrom(old.to_string()),
            _ => return Err(SpecError::UnknownStatus(s.to_string())),
        },
    };

    let date_format = payload
        .format
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

    let default = payload
        .default
        .map(|raw| convert_default(&payload.name, raw, field_type, &date_format))
        .transpose()?;

    Ok(FieldSpec {
        name: payload.name,
        field_type,
        date_format,
        default,
        required: payload.required,
        status,
    })
}

/// Converts a JSON default literal into a typed value, enforcing the
/// field's declared type at load time rather than per row.
fn convert_default(
    field: &str,
    raw: serde_json::Value,
    field_type: FieldType,
    date_format: &str,
) -> SpecResult<Value> {
    use serde_json::Value as Json;

    let mismatch = |raw: &Json| SpecError::InvalidDefault {
        field: field.to_string(),
        detail: format!("expected {}, got {raw}", field_type.type_name()),
    };

    match (field_type, &raw) {
        (_, Json::Null) => Ok(Value::Null),
        (FieldType::String, Json::String(s)) => Ok(Value::Str(s.clone())),
        (FieldType::Int, Json::Number(n)) => n.as_i64().map(Value::Int).ok_or_else(|| mismatch(&raw)),
        (FieldType::Float, Json::Number(n)) => {
            n.as_f64().map(Value::Float).ok_or_else(|| mismatch(&raw))
        }
        (FieldType::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),
        (FieldType::Date, Json::String(s)) => NaiveDate::parse_from_str(s, date_format)
            .map(Value::Date)
            .map_err(|e| SpecError::InvalidDefault {
                field: field.to_string(),
                detail: format!("'{s}' does not match '{date_format}': {e}"),
            }),
        _ => Err(mismatch(&raw)),
    }
}

fn build_format(payload: Option<FormatPayload>) -> SpecResult<FormatParams> {
    let Some(payload) = payload else {
        return Ok(FormatParams::delimited());
    };

    Ok(match payload {
        FormatPayload::Delimited {
            delimiter,
            has_header,
            quote,
            comment,
            skip_rows,
        } => FormatParams::Delimited {
            delimiter: one_byte("delimiter", &delimiter)?,
            has_header,
            quote: one_byte("quote", &quote)?,
            comment: comment.map(|c| one_byte("comment", &c)).transpose()?,
            skip_rows,
        },
        FormatPayload::Jsonl {} => FormatParams::Jsonl,
        FormatPayload::FixedWidth {
            columns,
            skip_rows,
            comment,
        } => FormatParams::FixedWidth {
            columns: columns
                .into_iter()
                .map(|c| FixedColumn {
                    name: c.name,
                    width: c.width,
                })
                .collect(),
            skip_rows,
            comment,
        },
        FormatPayload::Sheet { sheet, skip_rows } => FormatParams::Sheet {
            sheet: match sheet {
                SheetPayload::Index(i) => SheetSelector::Index(i),
                SheetPayload::Name(n) => SheetSelector::Name(n),
            },
            skip_rows,
        },
    })
}

/// Delimited format parameters must be exactly one byte. Anything else is
/// a structural entry error; defaulting here would load the entry with a
/// layout its author never declared.
fn one_byte(param: &'static str, s: &str) -> SpecResult<u8> {
    let mut bytes = s.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) => Ok(b),
        _ => Err(SpecError::InvalidFormatParam {
            param,
            value: s.to_string(),
        }),
    }
}

// Serde surface of a JSON entry. Kept separate from the domain types so
// the entry encoding can evolve without touching them.

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecPayload {
    file_pattern: OneOrMany,
    #[serde(default)]
    date_pattern: Option<String>,
    #[serde(default)]
    valid_from: Option<NaiveDate>,
    #[serde(default)]
    valid_until: Option<NaiveDate>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    format: Option<FormatPayload>,
    fields: Vec<FieldPayload>,
}

fn default_enabled() -> bool {
    true
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldPayload {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    default: Option<serde_json::Value>,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    status: Option<String>,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
enum FormatPayload {
    Delimited {
        #[serde(default = "default_delimiter")]
        delimiter: String,
        #[serde(default = "default_enabled")]
        has_header: bool,
        #[serde(default = "default_quote")]
        quote: String,
        #[serde(default)]
        comment: Option<String>,
        #[serde(default)]
        skip_rows: usize,
    },
    Jsonl {},
    FixedWidth {
        columns: Vec<ColumnPayload>,
        #[serde(default)]
        skip_rows: usize,
        #[serde(default)]
        comment: Option<String>,
    },
    Sheet {
        #[serde(default)]
        sheet: SheetPayload,
        #[serde(default)]
        skip_rows: usize,
    },
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_quote() -> String {
    "\"".to_string()
}

#[derive(Debug, Deserialize)]
struct ColumnPayload {
    name: String,
    width: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetPayload {
    Index(usize),
    Name(String),
}

impl Default for SheetPayload {
    fn default() -> Self {
        SheetPayload::Index(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> SpecResult<SpecDefinition> {
        JsonSpecParser.parse("entry", payload.as_bytes())
    }

    #[test]
    fn test_parse_minimal_entry() {
        let spec = parse(
            r#"{
                "file_pattern": "*.csv",
                "fields": [{ "name": "id", "type": "int" }]
            }"#,
        )
        .unwrap();

        assert_eq!(spec.id, "entry");
        assert!(spec.enabled);
        assert!(spec.validity.is_open());
        assert_eq!(spec.schema_version, 1);
        assert_eq!(spec.fields.len(), 1);
        assert!(matches!(spec.format, FormatParams::Delimited { .. }));
    }

    #[test]
    fn test_parse_full_entry() {
        let spec = parse(
            r#"{
                "file_pattern": ["customer-*.csv", "cust-*.csv"],
                "date_pattern": "-(\\d{4}-\\d{2})\\.csv$",
                "valid_from": "2018-01-01",
                "valid_until": "2019-02-01",
                "schema_version": 3,
                "format": { "kind": "delimited", "delimiter": ";", "has_header": false },
                "fields": [
                    { "name": "id", "type": "int" },
                    { "name": "email", "type": "string", "default": "", "status": "renamed-from:mail_address" },
                    { "name": "legacy", "type": "string", "required": false, "status": "deprecated" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(spec.schema_version, 3);
        assert_eq!(
            spec.validity,
            ValidityWindow::between(
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2019, 2, 1).unwrap()
            )
        );
        let email = spec.field("email").unwrap();
        assert_eq!(email.alias(), Some("mail_address"));
        assert_eq!(email.default, Some(Value::Str(String::new())));
        assert!(!spec.field("legacy").unwrap().is_emitted());
        match &spec.format {
            FormatParams::Delimited {
                delimiter,
                has_header,
                ..
            } => {
                assert_eq!(*delimiter, b';');
                assert!(!has_header);
            }
            other => panic!("unexpected format: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = parse(
            r#"{ "file_pattern": "*.csv", "fields": [{ "name": "id", "type": "decimal" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::UnknownType(t) if t == "decimal"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = parse(
            r#"{ "file_pattern": "*.csv", "fields": [{ "name": "id", "type": "int", "status": "retired" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::UnknownStatus(_)));
    }

    #[test]
    fn test_default_must_match_declared_type() {
        let err = parse(
            r#"{ "file_pattern": "*.csv", "fields": [{ "name": "id", "type": "int", "default": "zero" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::InvalidDefault { .. }));
    }

    #[test]
    fn test_date_default_parsed_with_field_format() {
        let spec = parse(
            r#"{
                "file_pattern": "*.csv",
                "fields": [{ "name": "booked", "type": "date", "format": "%Y%m%d", "default": "20190101" }]
            }"#,
        )
        .unwrap();
        assert_eq!(
            spec.field("booked").unwrap().default,
            Some(Value::Date(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()))
        );
    }

    #[test]
    fn test_multi_byte_delimiter_rejected() {
        let err = parse(
            r#"{
                "file_pattern": "*.csv",
                "format": { "kind": "delimited", "delimiter": "||" },
                "fields": [{ "name": "id", "type": "int" }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SpecError::InvalidFormatParam { param: "delimiter", value } if value == "||"
        ));
    }

    #[test]
    fn test_empty_quote_rejected() {
        let err = parse(
            r#"{
                "file_pattern": "*.csv",
                "format": { "kind": "delimited", "quote": "" },
                "fields": [{ "name": "id", "type": "int" }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SpecError::InvalidFormatParam { param: "quote", .. }
        ));
    }

    #[test]
    fn test_multi_byte_comment_prefix_rejected() {
        let err = parse(
            r#"{
                "file_pattern": "*.csv",
                "format": { "kind": "delimited", "comment": "//" },
                "fields": [{ "name": "id", "type": "int" }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SpecError::InvalidFormatParam { param: "comment", .. }
        ));
    }

    #[test]
    fn test_fixed_width_format() {
        let spec = parse(
            r#"{
                "file_pattern": "*.dat",
                "format": { "kind": "fixed-width", "columns": [
                    { "name": "id", "width": 6 },
                    { "name": "name", "width": 20 }
                ] },
                "fields": [{ "name": "id", "type": "int" }, { "name": "name", "type": "string" }]
            }"#,
        )
        .unwrap();
        match &spec.format {
            FormatParams::FixedWidth { columns, .. } => {
                assert_eq!(columns.len(), 2);
                assert_eq!(columns[1].width, 20);
            }
            other => panic!("unexpected format: {other:?}"),
        }
    }

    #[test]
    fn test_sheet_format_by_name() {
        let spec = parse(
            r#"{
                "file_pattern": "*.xlsx",
                "format": { "kind": "sheet", "sheet": "Accounts", "skip_rows": 2 },
                "fields": [{ "name": "id", "type": "int" }]
            }"#,
        )
        .unwrap();
        match &spec.format {
            FormatParams::Sheet { sheet, skip_rows } => {
                assert_eq!(*sheet, SheetSelector::Name("Accounts".into()));
                assert_eq!(*skip_rows, 2);
            }
            other => panic!("unexpected format: {other:?}"),
        }
    }

    #[test]
    fn test_disabled_entry() {
        let spec = parse(
            r#"{ "file_pattern": "*.csv", "enabled": false, "fields": [{ "name": "id", "type": "int" }] }"#,
        )
        .unwrap();
        assert!(!spec.enabled);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(parse("{ nope"), Err(SpecError::Json(_))));
    }

    #[test]
    fn test_duplicate_field_rejected_at_parse() {
        let err = parse(
            r#"{ "file_pattern": "*.csv", "fields": [
                { "name": "id", "type": "int" },
                { "name": "id", "type": "string" }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::DuplicateField(_)));
    }
}
