//! Typed values and coercion from raw text.
//!
//! Coercion is a fixed, total function per declared type: for any raw
//! string and any [`FieldType`] the outcome is either a well-defined
//! [`Value`] or a coercion failure, never a silent reinterpretation.

use std::fmt;

use chrono::NaiveDate;

use crate::spec::FieldType;

use super::errors::CoerceError;

/// A typed field value in a canonical record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl Value {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Null => "null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Coerces raw text into a typed value.
///
/// `date_format` is the strftime-style pattern declared on the field and
/// only consulted for `date` fields. Numeric and boolean text is trimmed
/// first.
pub fn coerce(raw: &str, field_type: FieldType, date_format: &str) -> Result<Value, CoerceError> {
    let fail = || CoerceError {
        expected: field_type.type_name(),
        raw: raw.to_string(),
    };

    match field_type {
        FieldType::String => Ok(Value::Str(raw.to_string())),
        FieldType::Int => raw.trim().parse::<i64>().map(Value::Int).map_err(|_| fail()),
        FieldType::Float => raw.trim().parse::<f64>().map(Value::Float).map_err(|_| fail()),
        FieldType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        FieldType::Date => NaiveDate::parse_from_str(raw.trim(), date_format)
            .map(Value::Date)
            .map_err(|_| fail()),
    }
}
