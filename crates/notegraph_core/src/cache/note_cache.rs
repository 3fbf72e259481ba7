//! Note cache store and shared handle.
//!
//! # Responsibility
//! - Own notes and branches and keep `Note::parents` in step with branches.
//! - Expose read-only lookups used by path resolution and similarity.
//!
//! # Invariants
//! - Note iteration order is ascending by `NoteId`.
//! - Removing a note detaches every branch that references it.

use crate::model::note::{Branch, BranchId, Note, NoteId};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cache handle shared between writers and long-running similarity scans.
///
/// Scans take short read guards per chunk, so writers can interleave.
pub type SharedNoteCache = Arc<RwLock<NoteCache>>;

/// Errors from cache mutation helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Branch child is not a cached note.
    ChildNotFound(NoteId),
    /// Branch parent is not a cached note.
    ParentNotFound(NoteId),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChildNotFound(id) => write!(f, "branch child note not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "branch parent note not found: {id}"),
        }
    }
}

impl Error for CacheError {}

/// In-memory view of the note graph.
#[derive(Debug, Clone, Default)]
pub struct NoteCache {
    notes: BTreeMap<NoteId, Note>,
    branches: HashMap<BranchId, Branch>,
    // child -> parent -> branch
    child_parent_to_branch: HashMap<NoteId, HashMap<NoteId, BranchId>>,
}

impl NoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps this cache into a shared handle.
    pub fn into_shared(self) -> SharedNoteCache {
        Arc::new(RwLock::new(self))
    }

    /// Inserts or replaces one note record.
    ///
    /// `parents` is owned by the cache: a new note starts without parents and a
    /// replaced note keeps the parents of its stored branches.
    pub fn insert_note(&mut self, mut note: Note) {
        note.parents = self
            .notes
            .remove(&note.note_id)
            .map(|previous| previous.parents)
            .unwrap_or_default();
        self.notes.insert(note.note_id.clone(), note);
    }

    /// Stores one branch and appends its parent to the child's `parents`.
    ///
    /// A second branch for the same `(child, parent)` pair replaces the first
    /// without reordering `parents`.
    pub fn insert_branch(&mut self, branch: Branch) -> Result<(), CacheError> {
        if !self.notes.contains_key(&branch.parent_note_id) {
            return Err(CacheError::ParentNotFound(branch.parent_note_id));
        }
        let Some(child) = self.notes.get_mut(&branch.note_id) else {
            return Err(CacheError::ChildNotFound(branch.note_id));
        };

        if !child.parents.contains(&branch.parent_note_id) {
            child.parents.push(branch.parent_note_id.clone());
        }

        let previous = self
            .child_parent_to_branch
            .entry(branch.note_id.clone())
            .or_default()
            .insert(branch.parent_note_id.clone(), branch.branch_id.clone());
        if let Some(previous) = previous.filter(|id| *id != branch.branch_id) {
            self.branches.remove(&previous);
        }

        self.branches.insert(branch.branch_id.clone(), branch);
        Ok(())
    }

    /// Removes one branch and detaches the parent from the child.
    pub fn remove_branch(&mut self, branch_id: &str) -> Option<Branch> {
        let branch = self.branches.remove(branch_id)?;
        self.detach(&branch.note_id, &branch.parent_note_id);
        Some(branch)
    }

    /// Removes one note and every branch where it is child or parent.
    pub fn remove_note(&mut self, note_id: &str) -> Option<Note> {
        let note = self.notes.remove(note_id)?;

        let affected: Vec<Branch> = self
            .branches
            .values()
            .filter(|branch| branch.note_id == note_id || branch.parent_note_id == note_id)
            .cloned()
            .collect();
        for branch in affected {
            self.branches.remove(&branch.branch_id);
            self.detach(&branch.note_id, &branch.parent_note_id);
        }
        self.child_parent_to_branch.remove(note_id);

        Some(note)
    }

    /// Looks up one note.
    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.get(note_id)
    }

    pub fn contains_note(&self, note_id: &str) -> bool {
        self.notes.contains_key(note_id)
    }

    /// Iterates all notes in ascending id order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Returns all note ids in iteration order.
    pub fn note_ids(&self) -> Vec<NoteId> {
        self.notes.keys().cloned().collect()
    }

    /// Returns the branch connecting `child_note_id` under `parent_note_id`.
    pub fn branch(&self, child_note_id: &str, parent_note_id: &str) -> Option<&Branch> {
        let branch_id = self
            .child_parent_to_branch
            .get(child_note_id)?
            .get(parent_note_id)?;
        self.branches.get(branch_id)
    }

    pub fn branch_by_id(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.get(branch_id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn detach(&mut self, child_note_id: &str, parent_note_id: &str) {
        if let Some(parents) = self.child_parent_to_branch.get_mut(child_note_id) {
            parents.remove(parent_note_id);
            if parents.is_empty() {
                self.child_parent_to_branch.remove(child_note_id);
            }
        }
        if let Some(child) = self.notes.get_mut(child_note_id) {
            child.parents.retain(|id| id != parent_note_id);
        }
    }
}
