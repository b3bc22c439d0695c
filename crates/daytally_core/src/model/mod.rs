//! Domain model for tracked events.
//!
//! # Responsibility
//! - Define the canonical event record shared by store, repository and views.
//! - Validate raw user input before it can become an `Event`.
//!
//! # Invariants
//! - Every event is identified by a stable `EventId`, never reused.
//! - Validation refuses to produce records with empty names or invalid dates.

pub mod event;
