//! JSON snapshot loading.
//!
//! # Responsibility
//! - Decode `{ "notes": [...], "branches": [...] }` documents.
//! - Build a `NoteCache` from decoded records.
//!
//! # Invariants
//! - Notes are inserted before branches.
//! - Branch order in the document defines each child's `parents` order.

use crate::cache::note_cache::{CacheError, NoteCache};
use crate::model::note::{Branch, Note};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Decoded snapshot document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// Errors while loading a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file cannot be read.
    Io(std::io::Error),
    /// Snapshot text is not a valid document.
    Decode(serde_json::Error),
    /// Snapshot references notes it does not define.
    Cache(CacheError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read snapshot: {err}"),
            Self::Decode(err) => write!(f, "invalid snapshot document: {err}"),
            Self::Cache(err) => write!(f, "inconsistent snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Cache(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<CacheError> for SnapshotError {
    fn from(value: CacheError) -> Self {
        Self::Cache(value)
    }
}

impl CacheSnapshot {
    /// Builds a cache from this snapshot.
    pub fn into_cache(self) -> Result<NoteCache, SnapshotError> {
        let mut cache = NoteCache::new();
        for note in self.notes {
            cache.insert_note(note);
        }
        for branch in self.branches {
            cache.insert_branch(branch)?;
        }
        Ok(cache)
    }
}

/// Decodes and builds a cache from JSON text.
pub fn cache_from_json(text: &str) -> Result<NoteCache, SnapshotError> {
    let snapshot: CacheSnapshot = serde_json::from_str(text)?;
    snapshot.into_cache()
}

/// Reads a JSON snapshot file and builds a cache from it.
///
/// # Side effects
/// - Emits one `snapshot_load` event with note count.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<NoteCache, SnapshotError> {
    let text = std::fs::read_to_string(path)?;
    let cache = cache_from_json(&text)?;
    info!(
        "event=snapshot_load module=cache status=ok notes={}",
        cache.len()
    );
    Ok(cache)
}
