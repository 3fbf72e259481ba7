//! Note and branch records.
//!
//! # Responsibility
//! - Describe one note as seen by path resolution and similarity scoring.
//! - Describe one parent -> child edge with its display prefix.
//!
//! # Invariants
//! - `parents` keeps branch attachment order; the first entry is the oldest.
//! - `utc_date_created` is immutable after the note is created.

use serde::{Deserialize, Serialize};

/// Stable identifier of one note.
pub type NoteId = String;

/// Stable identifier of one branch (parent -> child edge).
pub type BranchId = String;

/// Id of the absolute graph root. Every resolvable path starts here.
pub const ROOT_NOTE_ID: &str = "root";

/// One note in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: NoteId,
    /// Real title, or a placeholder when the store could not decrypt it.
    pub title: String,
    /// Title requires an active protected session to be shown.
    #[serde(default)]
    pub is_protected: bool,
    /// Explicit per-note archival flag.
    #[serde(default)]
    pub is_archived: bool,
    /// Archival status propagates to every descendant of this note.
    #[serde(default)]
    pub has_inheritable_owned_archived_label: bool,
    /// Denormalized text used only for similarity scoring.
    #[serde(default)]
    pub flat_text: String,
    /// Creation timestamp in canonical UTC form, e.g. `2021-03-04 10:20:30.000Z`.
    pub utc_date_created: String,
    /// Parent note ids in branch attachment order, maintained by the cache
    /// from stored branches.
    #[serde(default, skip_deserializing)]
    pub parents: Vec<NoteId>,
}

impl Note {
    /// Creates a plain, unprotected, non-archived note without parents.
    pub fn new(
        note_id: impl Into<NoteId>,
        title: impl Into<String>,
        utc_date_created: impl Into<String>,
    ) -> Self {
        Self {
            note_id: note_id.into(),
            title: title.into(),
            is_protected: false,
            is_archived: false,
            has_inheritable_owned_archived_label: false,
            flat_text: String::new(),
            utc_date_created: utc_date_created.into(),
            parents: Vec::new(),
        }
    }

    /// Returns whether this note is the absolute graph root.
    pub fn is_root(&self) -> bool {
        self.note_id == ROOT_NOTE_ID
    }
}

/// Edge between a parent note and a child note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: BranchId,
    /// Child side of the edge.
    pub note_id: NoteId,
    /// Parent side of the edge.
    pub parent_note_id: NoteId,
    /// Optional label rendered before the child title, as `"{prefix} - {title}"`.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Branch {
    pub fn new(
        branch_id: impl Into<BranchId>,
        note_id: impl Into<NoteId>,
        parent_note_id: impl Into<NoteId>,
    ) -> Self {
        Self {
            branch_id: branch_id.into(),
            note_id: note_id.into(),
            parent_note_id: parent_note_id.into(),
            prefix: None,
        }
    }

    /// Returns the prefix only when it carries visible text.
    pub fn display_prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|prefix| !prefix.is_empty())
    }
}
