//! Date arithmetic and clock abstraction.
//!
//! # Responsibility
//! - Compute whole-day distances between calendar dates.
//! - Provide the injectable clock used by repository and controller code.
//!
//! # Invariants
//! - `days_until` is pure: same inputs, same output, no hidden wall clock.
//! - All arithmetic operates on `NaiveDate`, so time-of-day and DST artifacts
//!   cannot influence the result.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Whole days from `today` to `target`.
///
/// 0 means today, positive means days remaining, negative means days elapsed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Classification of a day distance for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Past,
    Today,
    Future,
}

/// Maps a `days_until` result onto its display class.
pub fn day_status(days: i64) -> DayStatus {
    match days {
        d if d < 0 => DayStatus::Past,
        0 => DayStatus::Today,
        _ => DayStatus::Future,
    }
}

/// Long-form display string: weekday, day, month, year.
///
/// Display-only; never used for comparisons or persistence.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// The calendar day after `today`. Saturates at the end of the calendar.
pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

/// Injectable time source.
///
/// Production code uses [`SystemClock`]; tests use [`FixedClock`] so that
/// validation outcomes are deterministic.
pub trait Clock {
    /// Creation timestamp source for new events.
    fn now(&self) -> DateTime<Utc>;
    /// The current calendar day, in the user's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Deterministic clock pinned to one calendar day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
