//! Caller-supplied context for path resolution.
//!
//! # Responsibility
//! - Carry the current hoist root as an explicit value.
//! - Abstract the protected-session check behind a trait.

pub mod hoist;
pub mod session;
