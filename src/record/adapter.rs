//! Schema adapter: raw rows in, canonical records out.
//!
//! The adapter is where schema evolution is reconciled. For each declared
//! field, in order: the raw row is consulted by the field's current name,
//! then by its renamed-from alias, then the declared default applies, then
//! null for optional fields. Only then is the row rejected. Deprecated
//! fields keep their raw column recognized but are not emitted. Raw cells
//! unknown to the schema are dropped, or rejected in strict mode.

use std::sync::Arc;

use crate::reader::RawRow;
use crate::spec::{FieldType, SpecDefinition};

use super::errors::RowError;
use super::value::{coerce, Value};

/// The stable, caller-facing record shape: canonical field names mapped to
/// typed values, in declared schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    fields: Vec<(String, Value)>,
}

impl CanonicalRecord {
    /// Looks up a value by canonical field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns true if the record carries the field.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates fields in declared schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in declared schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Adapts raw rows from any format reader into canonical records for one
/// specification.
///
/// The adapter is format-agnostic: its only input shape is [`RawRow`].
#[derive(Debug, Clone)]
pub struct SchemaAdapter {
    spec: Arc<SpecDefinition>,
    strict: bool,
}

impl SchemaAdapter {
    /// Creates an adapter for the given spec.
    pub fn new(spec: Arc<SpecDefinition>) -> Self {
        Self {
            spec,
            strict: false,
        }
    }

    /// Enables strict mode: raw cells unknown to the schema reject the row
    /// instead of being dropped.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Returns the spec this adapter serves.
    pub fn spec(&self) -> &SpecDefinition {
        &self.spec
    }

    /// Produces a canonical record from one raw row.
    ///
    /// Row errors reject only this row; callers keep consuming the stream.
    pub fn adapt(&self, row: &RawRow) -> Result<CanonicalRecord, RowError> {
        if self.strict {
            for name in row.names() {
                if !self.claims(name) {
                    return Err(RowError::UnknownField(name.to_string()));
                }
            }
        }

        let mut fields = Vec::with_capacity(self.spec.fields.len());

        for field in &self.spec.fields {
            let raw = row
                .get(&field.name)
                .or_else(|| field.alias().and_then(|alias| row.get(alias)));

            // Empty cells count as absent for non-string types; delimited
            // and fixed-width data has no other way to express "no value".
            let raw = raw.filter(|text| {
                field.field_type == FieldType::String || !text.trim().is_empty()
            });

            let value = match raw {
                Some(text) => coerce(text, field.field_type, &field.date_format).map_err(
                    |e| RowError::TypeMismatch {
                        field: field.name.clone(),
                        expected: e.expected,
                        raw: e.raw,
                    },
                )?,
                None => match &field.default {
                    Some(default) => default.clone(),
                    None if field.required => {
                        return Err(RowError::MissingRequiredField(field.name.clone()));
                    }
                    None => Value::Null,
                },
            };

            if field.is_emitted() {
                fields.push((field.name.clone(), value));
            }
        }

        Ok(CanonicalRecord { fields })
    }

    /// Whether the schema recognizes a raw cell name, either as a current
    /// field name or as a renamed-from alias.
    fn claims(&self, name: &str) -> bool {
        self.spec
            .fields
            .iter()
            .any(|f| f.name == name || f.alias() == Some(name))
    }
}
