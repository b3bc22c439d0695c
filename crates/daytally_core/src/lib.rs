//! Core domain logic for Daytally, a day-countdown event tracker.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod store;

pub use clock::{
    day_status, days_until, format_display_date, tomorrow, Clock, DayStatus, FixedClock,
    SystemClock,
};
pub use controller::{EventController, MessageKind, View};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, ValidationError, MAX_EVENTS};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult};
pub use session::edit_session::{EditDraft, EditSession};
pub use store::event_store::{EventStore, SqliteEventStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
