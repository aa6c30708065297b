//! Use-case services over record snapshots.
//!
//! # Responsibility
//! - Expose read-only progress queries for UI callers.
//! - Apply single-writer edits to an owned snapshot.
//!
//! # Invariants
//! - Read services borrow snapshots immutably.
//! - Edit services return proposed state; persistence stays with the caller.

pub mod progress_service;
pub mod record_service;
