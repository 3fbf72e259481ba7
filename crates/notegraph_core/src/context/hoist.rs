//! Hoisting context.
//!
//! # Invariants
//! - The hoisted id is always a note id or `ROOT_NOTE_ID`; blank input falls
//!   back to the root.

use crate::model::note::{NoteId, ROOT_NOTE_ID};

/// Restricts resolvable paths to those passing through one hoist root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistContext {
    hoisted_note_id: NoteId,
}

impl HoistContext {
    /// Creates a context hoisted at `note_id`.
    pub fn new(note_id: impl Into<NoteId>) -> Self {
        Self {
            hoisted_note_id: normalize_hoisted_id(note_id.into()),
        }
    }

    /// Creates a context hoisted at the absolute root (no restriction).
    pub fn root() -> Self {
        Self {
            hoisted_note_id: ROOT_NOTE_ID.to_string(),
        }
    }

    pub fn hoisted_note_id(&self) -> &str {
        &self.hoisted_note_id
    }

    /// Moves the hoist root.
    pub fn set_hoisted_note_id(&mut self, note_id: impl Into<NoteId>) {
        self.hoisted_note_id = normalize_hoisted_id(note_id.into());
    }

    pub fn is_root(&self) -> bool {
        self.hoisted_note_id == ROOT_NOTE_ID
    }
}

impl Default for HoistContext {
    fn default() -> Self {
        Self::root()
    }
}

fn normalize_hoisted_id(value: NoteId) -> NoteId {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ROOT_NOTE_ID.to_string();
    }
    trimmed.to_string()
}
