//! Record model read by the progress engine.
//!
//! # Responsibility
//! - Define goals, challenges, projects, routines, dimensions, roles, skills.
//! - Define the immutable `Snapshot` the engine consumes.
//!
//! # Invariants
//! - Every item and skill is identified by a stable opaque `RecordKey`.
//! - Relations between records are key lookups, never ownership.

pub mod dimension;
pub mod history;
pub mod identity;
pub mod item;
pub mod key;
pub mod snapshot;
