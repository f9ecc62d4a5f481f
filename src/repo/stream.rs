//! The record stream: one open file, canonical records out.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::reader::RawRows;
use crate::record::{CanonicalRecord, SchemaAdapter};
use crate::spec::SpecDefinition;

use super::errors::RecordError;

/// A lazy, forward-only stream of canonical records from one open file.
///
/// The stream holds the spec it was opened under; a registry reload never
/// changes what an already-open stream yields. Each row adapts
/// independently: a row error is yielded in place and the next call moves
/// on to the following row. A read error is final; after yielding it the
/// stream is fused and returns `None` forever.
pub struct RecordStream {
    spec: Arc<SpecDefinition>,
    adapter: SchemaAdapter,
    rows: RawRows,
    position: u64,
    fused: bool,
}

impl RecordStream {
    pub(crate) fn new(spec: Arc<SpecDefinition>, adapter: SchemaAdapter, rows: RawRows) -> Self {
        Self {
            spec,
            adapter,
            rows,
            position: 0,
            fused: false,
        }
    }

    /// The spec this stream was opened under.
    pub fn spec(&self) -> &SpecDefinition {
        &self.spec
    }

    /// Number of data rows consumed so far, including rejected ones.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Iterator for RecordStream {
    type Item = Result<CanonicalRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.rows.next()? {
            Ok(raw) => {
                self.position += 1;
                let result = self.adapter.adapt(&raw);
                if let Err(e) = &result {
                    debug!(spec = %self.spec.id, row = self.position, %e, "row rejected");
                }
                Some(result.map_err(RecordError::Row))
            }
            Err(read) => {
                warn!(spec = %self.spec.id, %read, "stream aborted");
                self.fused = true;
                Some(Err(RecordError::Read(read)))
            }
        }
    }
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("spec", &self.spec.id)
            .field("position", &self.position)
            .field("fused", &self.fused)
            .finish()
    }
}
