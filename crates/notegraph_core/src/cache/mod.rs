//! In-memory note graph cache.
//!
//! # Responsibility
//! - Hold the note and branch records every read path traverses.
//! - Answer `(child, parent) -> Branch` lookups.
//! - Load a cache from a JSON snapshot for tools and tests.
//!
//! # Invariants
//! - A branch is only stored when both of its endpoints are cached notes.
//! - A child's `parents` list mirrors its stored branches, in attachment order.

pub mod note_cache;
pub mod snapshot;
