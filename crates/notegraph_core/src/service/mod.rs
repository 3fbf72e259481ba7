//! Read-side note graph services.
//!
//! # Responsibility
//! - Resolve display paths and titles under the current hoist root.
//! - Classify notes and paths as archived.
//!
//! # Invariants
//! - Services never mutate the cache.
//! - "Not found" and "hidden by hoisting" are `None`/`false`, never errors.

pub mod archive_service;
pub mod path_service;
