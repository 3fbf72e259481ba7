//! Note path discovery and title rendering.
//!
//! # Responsibility
//! - Find some path from the absolute root to a note that passes through the
//!   hoist root.
//! - Render per-segment titles with branch prefixes and protected redaction.
//!
//! # Invariants
//! - Parents are tried in `Note::parents` order; the first complete path wins.
//! - A returned path starts at `ROOT_NOTE_ID`, ends at the target, and
//!   contains the hoisted note id.
//! - A missing note never aborts rendering of the remaining segments.

use crate::cache::note_cache::NoteCache;
use crate::context::hoist::HoistContext;
use crate::context::session::ProtectedSession;
use crate::model::note::{BranchId, Note, NoteId, ROOT_NOTE_ID};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Title rendered when a path segment is missing from the cache.
pub const MISSING_NOTE_TITLE: &str = "[error fetching title]";
/// Title rendered for protected notes without an active protected session.
pub const PROTECTED_NOTE_TITLE: &str = "[protected]";

const TITLE_SEPARATOR: &str = " / ";
const PATH_SEPARATOR: &str = "/";

/// Fully described path to one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotePathRecord {
    pub note_id: NoteId,
    /// Branch linking the note to the previous path segment. `None` for root.
    pub branch_id: Option<BranchId>,
    /// Rendered titles joined with `" / "`.
    pub title: String,
    /// Note ids from the absolute root to the note, inclusive.
    pub note_path: Vec<NoteId>,
    /// `note_path` joined with `/`.
    pub path: String,
}

/// Finds some path from the absolute root to `note_id` under `hoist`.
///
/// Returns `None` when the note is unknown, has no route to the root, or every
/// route bypasses the hoisted note.
pub fn find_some_path(
    cache: &NoteCache,
    hoist: &HoistContext,
    note_id: &str,
) -> Option<Vec<NoteId>> {
    let note = cache.note(note_id)?;
    let mut suffix = Vec::new();
    let mut on_path = HashSet::new();
    search_path(cache, hoist, note, &mut suffix, &mut on_path)
}

fn search_path<'c>(
    cache: &'c NoteCache,
    hoist: &HoistContext,
    note: &'c Note,
    suffix: &mut Vec<&'c str>,
    on_path: &mut HashSet<&'c str>,
) -> Option<Vec<NoteId>> {
    if note.is_root() {
        let path: Vec<NoteId> = std::iter::once(note.note_id.as_str())
            .chain(suffix.iter().rev().copied())
            .map(str::to_string)
            .collect();
        if !path.iter().any(|id| id == hoist.hoisted_note_id()) {
            return None;
        }
        return Some(path);
    }

    if note.parents.is_empty() {
        return None;
    }
    // Cycles cannot come from a well-formed store; stop instead of recursing.
    if !on_path.insert(note.note_id.as_str()) {
        return None;
    }

    suffix.push(note.note_id.as_str());
    let mut found = None;
    for parent_id in &note.parents {
        let Some(parent) = cache.note(parent_id) else {
            continue;
        };
        if let Some(path) = search_path(cache, hoist, parent, suffix, on_path) {
            found = Some(path);
            break;
        }
    }
    suffix.pop();
    on_path.remove(note.note_id.as_str());

    found
}

/// Path and title resolver bound to one cache, hoist root and session.
pub struct PathResolver<'a, P: ProtectedSession + ?Sized> {
    cache: &'a NoteCache,
    hoist: &'a HoistContext,
    session: &'a P,
}

impl<'a, P: ProtectedSession + ?Sized> PathResolver<'a, P> {
    pub fn new(cache: &'a NoteCache, hoist: &'a HoistContext, session: &'a P) -> Self {
        Self {
            cache,
            hoist,
            session,
        }
    }

    /// Returns some path to `note_id`, see [`find_some_path`].
    pub fn some_path(&self, note_id: &str) -> Option<Vec<NoteId>> {
        find_some_path(self.cache, self.hoist, note_id)
    }

    /// Resolves a path to `note_id` and describes it for display.
    ///
    /// Returns `None` when the note is not cached or is hidden by hoisting.
    pub fn note_path(&self, note_id: &str) -> Option<NotePathRecord> {
        if !self.cache.contains_note(note_id) {
            debug!("event=note_path module=path status=not_found note_id={note_id}");
            return None;
        }

        let note_path = self.some_path(note_id)?;
        let branch_id = note_path
            .len()
            .checked_sub(2)
            .and_then(|index| self.cache.branch(note_id, &note_path[index]))
            .map(|branch| branch.branch_id.clone());

        Some(NotePathRecord {
            note_id: note_id.to_string(),
            branch_id,
            title: self.note_title_for_path(&note_path),
            path: note_path.join(PATH_SEPARATOR),
            note_path,
        })
    }

    /// Returns whether `note_id` exists and is visible under the hoist root.
    pub fn is_available(&self, note_id: &str) -> bool {
        self.note_path(note_id).is_some()
    }

    /// Renders the title of `child_note_id` as seen under `parent_note_id`.
    pub fn note_title(&self, child_note_id: &str, parent_note_id: Option<&str>) -> String {
        let Some(child) = self.cache.note(child_note_id) else {
            warn!("event=note_title module=path status=missing note_id={child_note_id}");
            return MISSING_NOTE_TITLE.to_string();
        };

        let title = if child.is_protected && !self.session.is_protected_session_available() {
            PROTECTED_NOTE_TITLE
        } else {
            child.title.as_str()
        };

        let prefix = parent_note_id
            .filter(|parent_id| self.cache.contains_note(parent_id))
            .and_then(|parent_id| self.cache.branch(child_note_id, parent_id))
            .and_then(|branch| branch.display_prefix());

        match prefix {
            Some(prefix) => format!("{prefix} - {title}"),
            None => title.to_string(),
        }
    }

    /// Renders titles for every segment after the hoist root.
    ///
    /// A path consisting of the hoisted note alone renders that note's title.
    pub fn note_title_array_for_path(&self, note_path: &[NoteId]) -> Vec<String> {
        let hoisted_note_id = self.hoist.hoisted_note_id();
        if let [only] = note_path {
            if only == hoisted_note_id {
                return vec![self.note_title(hoisted_note_id, None)];
            }
        }

        let mut titles = Vec::new();
        let mut parent_note_id: &str = ROOT_NOTE_ID;
        let mut hoisted_note_passed = false;

        for note_id in note_path {
            if hoisted_note_passed {
                titles.push(self.note_title(note_id, Some(parent_note_id)));
            }
            if note_id == hoisted_note_id {
                hoisted_note_passed = true;
            }
            parent_note_id = note_id.as_str();
        }

        titles
    }

    /// Renders the path titles joined with `" / "`.
    pub fn note_title_for_path(&self, note_path: &[NoteId]) -> String {
        self.note_title_array_for_path(note_path).join(TITLE_SEPARATOR)
    }
}
