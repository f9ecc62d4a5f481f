//! Registry locations.
//!
//! The core asks very little of wherever specs are stored: enumerate
//! entry identifiers, fetch one entry's payload. [`DirRegistry`] covers
//! the common case of a directory of `*.json` entries; anything else
//! (an archive, a config service) implements [`SpecRegistry`] itself.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{LoadError, LoadResult};

/// An addressable collection of specification entries.
///
/// `list_entries` defines the registry order: specs are indexed and
/// tie-broken in exactly the order returned here, so implementations
/// should keep it stable across calls.
pub trait SpecRegistry: Send + Sync {
    /// Entry identifiers, in registry order.
    fn list_entries(&self) -> LoadResult<Vec<String>>;

    /// The raw payload of one entry.
    fn read_entry(&self, id: &str) -> LoadResult<Vec<u8>>;
}

/// A registry backed by a directory of `*.json` entry files.
///
/// Entry ids are file stems. Enumeration is sorted by name, which makes
/// the registry order predictable for authors: prefix an entry name to
/// move it earlier, exactly as with numbered config files.
#[derive(Debug, Clone)]
pub struct DirRegistry {
    root: PathBuf,
}

impl DirRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The registry directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SpecRegistry for DirRegistry {
    fn list_entries(&self) -> LoadResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            LoadError::Registry(format!("{}: {e}", self.root.display()))
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LoadError::Registry(format!("{}: {e}", self.root.display()))
            })?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read_entry(&self, id: &str) -> LoadResult<Vec<u8>> {
        let path = self.root.join(format!("{id}.json"));
        fs::read(&path).map_err(|e| LoadError::Unreadable {
            entry: id.to_string(),
            detail: format!("{}: {e}", path.display()),
        })
    }
}
