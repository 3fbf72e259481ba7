//! Archival classification over note paths.
//!
//! # Responsibility
//! - Decide whether a resolved path ends in an archived note.
//! - Answer ancestor reachability over the parent DAG.
//!
//! # Invariants
//! - A path is archived when its last note is archived, or when any earlier
//!   note carries an inheritable archived label.
//! - Ancestor search explores every parent and visits each note at most once.

use crate::cache::note_cache::NoteCache;
use crate::context::hoist::HoistContext;
use crate::model::note::{NoteId, ROOT_NOTE_ID};
use crate::service::path_service::find_some_path;
use log::debug;
use std::collections::HashSet;

/// Returns whether `note_path` leads to an archived note.
///
/// Segments missing from the cache contribute nothing.
pub fn is_note_path_archived(cache: &NoteCache, note_path: &[NoteId]) -> bool {
    let Some((last, ancestors)) = note_path.split_last() else {
        return false;
    };

    if cache.note(last).is_some_and(|note| note.is_archived) {
        return true;
    }

    ancestors.iter().any(|note_id| {
        cache
            .note(note_id)
            .is_some_and(|note| note.has_inheritable_owned_archived_label)
    })
}

/// Archival classifier bound to one cache and hoist root.
pub struct ArchiveClassifier<'a> {
    cache: &'a NoteCache,
    hoist: &'a HoistContext,
}

impl<'a> ArchiveClassifier<'a> {
    pub fn new(cache: &'a NoteCache, hoist: &'a HoistContext) -> Self {
        Self { cache, hoist }
    }

    /// See [`is_note_path_archived`].
    pub fn is_note_path_archived(&self, note_path: &[NoteId]) -> bool {
        is_note_path_archived(self.cache, note_path)
    }

    /// Classifies the path [`find_some_path`] resolves for `note_id`.
    ///
    /// Notes without a visible path are reported as not archived.
    pub fn is_archived(&self, note_id: &str) -> bool {
        match find_some_path(self.cache, self.hoist, note_id) {
            Some(note_path) => is_note_path_archived(self.cache, &note_path),
            None => {
                debug!("event=is_archived module=archive status=no_path note_id={note_id}");
                false
            }
        }
    }

    /// Returns whether `ancestor_note_id` is the root, the note itself, or
    /// reachable by following parents from `note_id`, archived paths included.
    pub fn is_in_ancestor(&self, note_id: &str, ancestor_note_id: &str) -> bool {
        if ancestor_note_id == ROOT_NOTE_ID || ancestor_note_id == note_id {
            return true;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![note_id];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(note) = self.cache.note(current) else {
                continue;
            };
            for parent_id in &note.parents {
                if parent_id == ancestor_note_id {
                    return true;
                }
                stack.push(parent_id.as_str());
            }
        }

        false
    }
}
