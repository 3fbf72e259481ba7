//! Note graph path resolution and similar-note discovery.
//!
//! Works over an in-memory cache of a DAG-shaped note collection: resolves
//! display paths under a hoist root, classifies archived notes and paths, and
//! ranks similar notes with a chunked, cooperative scan.

pub mod cache;
pub mod context;
pub mod dates;
pub mod logging;
pub mod model;
pub mod service;
pub mod similarity;

pub use cache::note_cache::{CacheError, NoteCache, SharedNoteCache};
pub use cache::snapshot::{cache_from_json, load_snapshot, CacheSnapshot, SnapshotError};
pub use context::hoist::HoistContext;
pub use context::session::{ProtectedSession, StaticSession};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Branch, BranchId, Note, NoteId, ROOT_NOTE_ID};
pub use service::archive_service::{is_note_path_archived, ArchiveClassifier};
pub use service::path_service::{
    find_some_path, NotePathRecord, PathResolver, MISSING_NOTE_TITLE, PROTECTED_NOTE_TITLE,
};
pub use similarity::engine::{
    SimilarityEngine, SimilarityError, SimilarityOptions, SimilarityResult,
};
pub use similarity::text::{DiceCoefficient, TextSimilarity};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
