//! Similar-note discovery.
//!
//! # Responsibility
//! - Score every cached note against one source note.
//! - Rank, penalize and bound the candidate list.
//!
//! # Invariants
//! - Scans yield to the runtime between fixed-size chunks.
//! - Candidates hidden by hoisting never appear in results.

pub mod engine;
pub mod text;
