//! Durable event storage contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the persistence contract the repository layer depends on.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Each store operation is a single atomic statement; no partial writes are
//!   observable.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod event_store;
