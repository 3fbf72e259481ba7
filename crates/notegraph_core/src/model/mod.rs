//! Read-model types for the note graph.
//!
//! # Responsibility
//! - Define the note and branch records the cache hands out.
//! - Name the sentinel root every note path starts from.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Only the root note may have an empty `parents` list.
//! - Core never mutates these records while resolving or scoring.

pub mod note;
