//! Single-item edit state machine.
//!
//! # Responsibility
//! - Track which event, if any, is currently being edited.
//! - Hold uncommitted draft values until commit or cancel.
//!
//! # Invariants
//! - At most one event is in edit mode at any time.
//! - Committed values are never touched by draft mutation or cancel.

pub mod edit_session;
