//! Specification type definitions.
//!
//! A [`SpecDefinition`] is the immutable description of one registered
//! specification: how files are matched, when the spec is authoritative,
//! what fields a record carries, and which physical format the data
//! arrives in. Definitions are built once at registry-load time and never
//! mutated afterwards.

use chrono::NaiveDate;

use super::pattern::MatchRule;
use crate::record::Value;

/// Supported field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Calendar date, parsed with the field's declared format
    Date,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::Bool => "bool",
        }
    }

    /// Parses a type name as written in registry entries.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "int" => Some(FieldType::Int),
            "float" => Some(FieldType::Float),
            "date" => Some(FieldType::Date),
            "bool" => Some(FieldType::Bool),
            _ => None,
        }
    }
}

/// Lifecycle status of a field within a spec version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    /// Normal field, emitted in every canonical record.
    Active,
    /// Still declared so raw data carrying it stays recognized, but the
    /// field is no longer emitted.
    Deprecated,
    /// Active field that older data knows under a previous name.
    RenamedFrom(String),
}

/// Default strftime-style format for `date` fields.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One field of a record schema.
///
/// The name is canonical and stable across spec versions; renames are
/// expressed through [`FieldStatus::RenamedFrom`] so older raw data keeps
/// resolving to the same canonical field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Canonical field name, unique within a spec.
    pub name: String,
    /// Declared type.
    pub field_type: FieldType,
    /// Parse format for `date` fields.
    pub date_format: String,
    /// Value used when a row (or an older format version) lacks the field.
    pub default: Option<Value>,
    /// A missing value with no default on a required field rejects the row.
    pub required: bool,
    /// Lifecycle status.
    pub status: FieldStatus,
}

impl FieldSpec {
    /// Creates an active, required field of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            default: None,
            required: true,
            status: FieldStatus::Active,
        }
    }

    /// Creates a required string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Creates a required int field.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }

    /// Creates a required float field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    /// Creates a required date field with the default format.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Creates a required bool field.
    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool)
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the field as optional: missing values become null instead of
    /// rejecting the row.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the date parse format.
    pub fn with_date_format(mut self, fmt: impl Into<String>) -> Self {
        self.date_format = fmt.into();
        self
    }

    /// Declares the name this field carried in older data.
    pub fn renamed_from(mut self, old_name: impl Into<String>) -> Self {
        self.status = FieldStatus::RenamedFrom(old_name.into());
        self
    }

    /// Marks the field as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.status = FieldStatus::Deprecated;
        self
    }

    /// The alias this field answers to in raw data, if any.
    pub fn alias(&self) -> Option<&str> {
        match &self.status {
            FieldStatus::RenamedFrom(old) => Some(old),
            _ => None,
        }
    }

    /// Whether the field appears in canonical records.
    pub fn is_emitted(&self) -> bool {
        !matches!(self.status, FieldStatus::Deprecated)
    }
}

/// The date range during which a spec version is authoritative.
///
/// Closed-open: `from` is inclusive, `to` is exclusive. An absent bound is
/// open on that side; a window with both bounds absent is always
/// applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidityWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ValidityWindow {
    /// A fully open window (always applicable).
    pub fn open() -> Self {
        Self::default()
    }

    /// A window bounded on both sides, `[from, to)`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A window with only an exclusive upper bound.
    pub fn until(to: NaiveDate) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// A window with only an inclusive lower bound.
    pub fn starting(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Returns true if neither bound is set.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns true if the date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date >= to {
                return false;
            }
        }
        true
    }

    /// Width in days, or `None` for a window open on either side.
    pub fn width_days(&self) -> Option<i64> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((to - from).num_days()),
            _ => None,
        }
    }

    /// Ranking key for the "narrowest window wins" tie-break: fully
    /// bounded windows order by width, half-open windows come next, fully
    /// open windows last.
    pub fn narrowness(&self) -> (u8, i64) {
        match (self.from, self.to) {
            (Some(from), Some(to)) => (0, (to - from).num_days()),
            (Some(_), None) | (None, Some(_)) => (1, i64::MAX),
            (None, None) => (2, i64::MAX),
        }
    }
}

/// One column of a fixed-width layout.
#[derive(Debug, Clone)]
pub struct FixedColumn {
    pub name: String,
    /// Width in bytes.
    pub width: usize,
}

/// Sheet selection for spreadsheet sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    Index(usize),
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

/// Physical format binding plus its format-specific parameters.
#[derive(Debug, Clone)]
pub enum FormatParams {
    /// Delimited text (CSV and friends).
    Delimited {
        delimiter: u8,
        has_header: bool,
        quote: u8,
        comment: Option<u8>,
        skip_rows: usize,
    },
    /// Line-delimited structured records, one JSON object per line.
    Jsonl,
    /// Fixed-width columns, sliced by byte offsets.
    FixedWidth {
        columns: Vec<FixedColumn>,
        skip_rows: usize,
        comment: Option<String>,
    },
    /// Spreadsheet sheet, read through a registered sheet reader.
    Sheet {
        sheet: SheetSelector,
        skip_rows: usize,
    },
}

impl FormatParams {
    /// Default parameters for delimited text: comma, header row, double
    /// quotes, no comments, no skipped rows.
    pub fn delimited() -> Self {
        FormatParams::Delimited {
            delimiter: b',',
            has_header: true,
            quote: b'"',
            comment: None,
            skip_rows: 0,
        }
    }
}

/// An immutable, registered file specification.
#[derive(Debug, Clone)]
pub struct SpecDefinition {
    /// Unique identifier, derived from the registry entry name.
    pub id: String,
    /// Static pattern and optional date capture.
    pub match_rule: MatchRule,
    /// Date range during which this spec is authoritative.
    pub validity: ValidityWindow,
    /// Registered-but-switched-off specs never become candidates.
    pub enabled: bool,
    /// Record schema, in declared order.
    pub fields: Vec<FieldSpec>,
    /// Physical format binding.
    pub format: FormatParams,
    /// Schema version number.
    pub schema_version: u32,
}

impl SpecDefinition {
    /// Creates an enabled spec with an open validity window and schema
    /// version 1.
    pub fn new(id: impl Into<String>, match_rule: MatchRule, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: id.into(),
            match_rule,
            validity: ValidityWindow::open(),
            enabled: true,
            fields,
            format: FormatParams::delimited(),
            schema_version: 1,
        }
    }

    /// Sets the validity window.
    pub fn with_validity(mut self, validity: ValidityWindow) -> Self {
        self.validity = validity;
        self
    }

    /// Sets the format binding.
    pub fn with_format(mut self, format: FormatParams) -> Self {
        self.format = format;
        self
    }

    /// Sets the schema version.
    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.schema_version = version;
        self
    }

    /// Disables the spec.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Looks up a field by canonical name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates internal consistency: unique field names (aliases
    /// included) and a non-inverted validity window.
    pub fn validate_structure(&self) -> Result<(), super::errors::SpecError> {
        use super::errors::SpecError;

        let mut seen: Vec<&str> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if seen.contains(&field.name.as_str()) {
                return Err(SpecError::DuplicateField(field.name.clone()));
            }
            seen.push(&field.name);
            if let Some(alias) = field.alias() {
                if seen.contains(&alias) {
                    return Err(SpecError::DuplicateField(alias.to_string()));
                }
                seen.push(alias);
            }
        }

        if let (Some(from), Some(to)) = (self.validity.from, self.validity.to) {
            if from >= to {
                return Err(SpecError::InvertedWindow {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        if let FormatParams::FixedWidth { columns, .. } = &self.format {
            if columns.is_empty() {
                return Err(SpecError::NoColumns);
            }
            if let Some(col) = columns.iter().find(|c| c.width == 0) {
                return Err(SpecError::ZeroWidth(col.name.clone()));
            }
        }

        Ok(())
    }
}
