//! In-memory event repository layered over durable storage.
//!
//! # Responsibility
//! - Own the authoritative event list for the session.
//! - Enforce validation and capacity before anything reaches the store.
//!
//! # Invariants
//! - In-memory state is mutated only after the store acknowledges a write.
//! - Validation errors never reach the store.

pub mod event_repo;
