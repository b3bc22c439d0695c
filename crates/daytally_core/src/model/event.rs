//! Event record and input validation.
//!
//! # Responsibility
//! - Define the `Event` entity and its identity type.
//! - Turn raw `(name, date)` user input into validated field values.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `name` is never empty or whitespace-only after trimming.
//! - `date` is a real calendar date; unparseable input never reaches storage.
//! - `created_at` is set once at creation and only used for default ordering.

use crate::clock::days_until;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a tracked event.
///
/// Random 128-bit value rendered as text in storage; opaque to callers.
pub type EventId = Uuid;

/// Hard cap on live events. Checked on `add`, deliberately not on `edit`,
/// since editing never changes the population count.
pub const MAX_EVENTS: usize = 250;

/// Canonical storage format for event dates, and the text shape that the
/// raw-substring search path matches against.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One tracked date with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique ID, generated at creation, immutable.
    pub id: EventId,
    /// Display name, user-editable, non-empty after trim.
    pub name: String,
    /// Target calendar date, user-editable. No time component.
    pub date: NaiveDate,
    /// Creation timestamp, immutable, used only for default ordering.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event with a freshly generated ID.
    ///
    /// Callers must pass already-validated fields; see [`validate_input`].
    pub fn new(name: impl Into<String>, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), name, date, created_at)
    }

    /// Creates an event with a caller-provided ID.
    ///
    /// Used when rehydrating records from storage, where identity already
    /// exists.
    pub fn with_id(
        id: EventId,
        name: impl Into<String>,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            created_at,
        }
    }

    /// ISO `YYYY-MM-DD` text form of the target date.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Input validation failures, detected before any persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name or date input is empty after trimming.
    EmptyField,
    /// Date input does not parse as a calendar date.
    InvalidDate(String),
    /// Target date lies before today.
    PastDate(NaiveDate),
    /// The live-event cap has been reached.
    CapacityExceeded(usize),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField => write!(f, "name and date must both be provided"),
            Self::InvalidDate(raw) => write!(f, "`{raw}` is not a valid calendar date"),
            Self::PastDate(date) => write!(f, "date {date} lies in the past"),
            Self::CapacityExceeded(max) => write!(f, "event limit of {max} reached"),
        }
    }
}

impl Error for ValidationError {}

/// Validates raw `(name, date)` user input.
///
/// Returns the trimmed name and the parsed date on success. `today` is
/// injected so the past-date rule stays testable.
///
/// # Errors
/// - `EmptyField` when either input is empty after trimming.
/// - `InvalidDate` when the date does not parse as ISO `YYYY-MM-DD`.
/// - `PastDate` when the date lies strictly before `today`.
pub fn validate_input(
    name: &str,
    date: &str,
    today: NaiveDate,
) -> Result<(String, NaiveDate), ValidationError> {
    let name = name.trim();
    let date_text = date.trim();
    if name.is_empty() || date_text.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let parsed = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date_text.to_string()))?;

    if days_until(parsed, today) < 0 {
        return Err(ValidationError::PastDate(parsed));
    }

    Ok((name.to_string(), parsed))
}
