//! The in-memory specification index.
//!
//! Built wholesale from a registry, queried many times, never mutated.
//! Reloading produces a new index with a higher generation; readers
//! holding the old one keep a consistent view for as long as they keep
//! it.

use std::sync::Arc;

use tracing::debug;

use crate::spec::{SpecDefinition, SpecError, SpecParser};

use super::errors::{LoadError, LoadResult};
use super::registry::SpecRegistry;

/// One indexed spec together with its registry sequence number.
///
/// The sequence is the position in registry order and feeds the
/// most-recently-registered tie-break.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub seq: usize,
    pub spec: Arc<SpecDefinition>,
}

/// All loaded spec definitions for one registry generation.
#[derive(Debug)]
pub struct SpecIndex {
    specs: Vec<Arc<SpecDefinition>>,
    generation: u64,
}

impl SpecIndex {
    /// Loads every entry of the registry through the parser.
    ///
    /// All-or-nothing: any unreadable or structurally invalid entry
    /// (including a duplicate id) fails the load.
    pub fn load(registry: &dyn SpecRegistry, parser: &dyn SpecParser) -> LoadResult<Self> {
        Self::load_generation(registry, parser, 1)
    }

    /// Loads with an explicit generation number. Used by reload to keep
    /// generations monotonic across swaps.
    pub fn load_generation(
        registry: &dyn SpecRegistry,
        parser: &dyn SpecParser,
        generation: u64,
    ) -> LoadResult<Self> {
        let ids = registry.list_entries()?;

        let mut specs: Vec<Arc<SpecDefinition>> = Vec::with_capacity(ids.len());
        for id in ids {
            let payload = registry.read_entry(&id)?;
            let spec = parser
                .parse(&id, &payload)
                .map_err(|e| LoadError::invalid(&id, e))?;

            if specs.iter().any(|s| s.id == spec.id) {
                return Err(LoadError::invalid(&id, SpecError::DuplicateId(spec.id)));
            }
            specs.push(Arc::new(spec));
        }

        debug!(count = specs.len(), generation, "spec index loaded");

        Ok(Self { specs, generation })
    }

    /// Builds an index directly from definitions, in the given order.
    /// Each definition is structurally validated; duplicates are rejected.
    pub fn from_specs(specs: Vec<SpecDefinition>, generation: u64) -> LoadResult<Self> {
        let mut out: Vec<Arc<SpecDefinition>> = Vec::with_capacity(specs.len());
        for spec in specs {
            spec.validate_structure()
                .map_err(|e| LoadError::invalid(&spec.id, e))?;
            if out.iter().any(|s| s.id == spec.id) {
                return Err(LoadError::invalid(&spec.id, SpecError::DuplicateId(spec.id.clone())));
            }
            out.push(Arc::new(spec));
        }
        Ok(Self {
            specs: out,
            generation,
        })
    }

    /// The index generation, bumped on every reload.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every enabled spec whose static pattern matches the path, in
    /// registry order. The validity window is deliberately ignored here;
    /// that filter belongs to resolution.
    pub fn candidates_for(&self, path: &str) -> Vec<Candidate> {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.enabled && spec.match_rule.matches(path))
            .map(|(seq, spec)| Candidate {
                seq,
                spec: Arc::clone(spec),
            })
            .collect()
    }

    /// Looks up a spec by id.
    pub fn get(&self, id: &str) -> Option<&Arc<SpecDefinition>> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// All specs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpecDefinition>> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
