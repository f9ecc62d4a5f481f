//! The repository facade.
//!
//! One handle wires the subsystems together: a registry is loaded into a
//! spec index, paths resolve against the index, and resolved files open
//! as record streams through the reader set. The index lives behind an
//! [`ArcSwap`] so `reload` swaps in a replacement without blocking
//! readers; streams opened before a reload keep the spec they resolved.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::NaiveDate;
use tracing::info;

use crate::index::{DirRegistry, LoadResult, SpecIndex, SpecRegistry};
use crate::reader::{ReaderSet, SheetReader};
use crate::record::SchemaAdapter;
use crate::resolve::{resolve_at, ResolveResult};
use crate::spec::{JsonSpecParser, SpecDefinition, SpecParser};

use super::errors::OpenError;
use super::stream::RecordStream;

/// Per-open knobs. The default is lenient adaptation with no effective
/// date constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    strict: bool,
    effective_date: Option<NaiveDate>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject rows carrying cells the schema does not recognize.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Resolve as of a specific date: only specs whose validity window
    /// contains it are considered.
    pub fn effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }
}

/// A loaded specification repository.
pub struct Repository {
    registry: Box<dyn SpecRegistry>,
    parser: Box<dyn SpecParser>,
    readers: ReaderSet,
    index: ArcSwap<SpecIndex>,
}

impl Repository {
    /// Opens a repository over a directory of `*.json` spec entries.
    pub fn from_dir(root: impl AsRef<Path>) -> LoadResult<Self> {
        Self::new(Box::new(DirRegistry::new(root.as_ref())), Box::new(JsonSpecParser))
    }

    /// Opens a repository over any registry and parser pair. The whole
    /// registry is loaded up front; a bad entry fails construction.
    pub fn new(
        registry: Box<dyn SpecRegistry>,
        parser: Box<dyn SpecParser>,
    ) -> LoadResult<Self> {
        let index = SpecIndex::load(registry.as_ref(), parser.as_ref())?;
        info!(specs = index.len(), "repository loaded");
        Ok(Self {
            registry,
            parser,
            readers: ReaderSet::new(),
            index: ArcSwap::from_pointee(index),
        })
    }

    /// Registers (or replaces) the spreadsheet reader used for specs
    /// bound to a sheet format.
    pub fn register_sheet_reader(&mut self, reader: Arc<dyn SheetReader>) {
        self.readers.register_sheet_reader(reader);
    }

    /// The current index. Callers holding the returned handle keep a
    /// consistent view across reloads.
    pub fn index(&self) -> Arc<SpecIndex> {
        self.index.load_full()
    }

    /// Re-reads the registry and atomically swaps in the new index.
    ///
    /// All-or-nothing: on failure the current index stays in service.
    /// Returns the new generation on success.
    pub fn reload(&self) -> LoadResult<u64> {
        let generation = self.index.load().generation() + 1;
        let next =
            SpecIndex::load_generation(self.registry.as_ref(), self.parser.as_ref(), generation)?;
        self.index.store(Arc::new(next));
        info!(generation, "spec index reloaded");
        Ok(generation)
    }

    /// Resolves the spec governing a path without opening the file.
    pub fn resolve(&self, path: impl AsRef<Path>) -> ResolveResult<Arc<SpecDefinition>> {
        let text = path.as_ref().to_string_lossy();
        resolve_at(&text, &self.index.load(), None)
    }

    /// Resolves a path and opens the file as a record stream.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<RecordStream, OpenError> {
        self.open_with(path, OpenOptions::default())
    }

    /// Like [`open`], with per-open options.
    ///
    /// [`open`]: Repository::open
    pub fn open_with(
        &self,
        path: impl AsRef<Path>,
        options: OpenOptions,
    ) -> Result<RecordStream, OpenError> {
        let path = path.as_ref();
        let text = path.to_string_lossy();

        let spec = resolve_at(&text, &self.index.load(), options.effective_date)?;
        let rows = self.readers.rows(path, &spec)?;

        let mut adapter = SchemaAdapter::new(Arc::clone(&spec));
        if options.strict {
            adapter = adapter.strict();
        }

        Ok(RecordStream::new(spec, adapter, rows))
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("specs", &self.index.load().len())
            .field("generation", &self.index.load().generation())
            .finish()
    }
}
