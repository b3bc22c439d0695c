//! Authoritative event list and its filtered display view.
//!
//! # Responsibility
//! - Orchestrate store calls for add/edit/remove/load.
//! - Maintain the derived filtered view, sorted ascending by target date.
//!
//! # Invariants
//! - `events` is newest-created-first by default; `filtered` is always
//!   date-ascending regardless of insertion order.
//! - Every write follows mutate-after-success: the store commits first, then
//!   memory changes. A failed store call leaves memory untouched.
//! - Operations run to completion one at a time; an edit's target cannot
//!   vanish between its lookup and its write-back.

use crate::clock::Clock;
use crate::model::event::{validate_input, Event, EventId, ValidationError, MAX_EVENTS};
use crate::store::event_store::{EventStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure taxonomy: validation, persistence, or a missing entity.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(StoreError),
    NotFound(EventId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Single owner of event values during a session.
///
/// The store owns the durable copy across sessions and is the source of truth
/// on [`load`](Self::load).
pub struct EventRepository<S: EventStore, C: Clock> {
    store: S,
    clock: C,
    events: Vec<Event>,
    filtered: Vec<Event>,
    search_term: String,
    max_events: usize,
}

impl<S: EventStore, C: Clock> EventRepository<S, C> {
    /// Creates a repository with the default capacity of [`MAX_EVENTS`].
    pub fn new(store: S, clock: C) -> Self {
        Self::with_capacity_limit(store, clock, MAX_EVENTS)
    }

    /// Creates a repository with an explicit capacity cap.
    pub fn with_capacity_limit(store: S, clock: C, max_events: usize) -> Self {
        Self {
            store,
            clock,
            events: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            max_events,
        }
    }

    /// Replaces in-memory state with the durable copy.
    ///
    /// Records are sorted most-recently-created first (id tie-break keeps the
    /// order deterministic). Any active search term is dropped: a fresh load
    /// shows the whole list.
    pub fn load(&mut self) -> RepoResult<()> {
        let mut events = self.store.load_all()?;
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        self.events = events;
        self.search_term.clear();
        self.refilter();
        info!(
            "event=events_load module=repo status=ok count={}",
            self.events.len()
        );
        Ok(())
    }

    /// Validates, persists and prepends a new event.
    ///
    /// # Errors
    /// - `Validation` for empty fields, unparseable or past dates, and the
    ///   capacity cap.
    /// - `Store` when persistence fails; memory is left unchanged.
    pub fn add(&mut self, name: &str, date: &str) -> RepoResult<Event> {
        let (name, date) = validate_input(name, date, self.clock.today())?;
        if self.events.len() >= self.max_events {
            return Err(ValidationError::CapacityExceeded(self.max_events).into());
        }

        let event = Event::new(name, date, self.clock.now());
        self.store.insert(&event)?;

        self.events.insert(0, event.clone());
        self.refilter();
        info!(
            "event=event_add module=repo status=ok id={} date={}",
            event.id,
            event.date_text()
        );
        Ok(event)
    }

    /// Replaces name/date of an existing event, preserving id and created_at.
    ///
    /// Capacity is deliberately not re-checked: editing never changes the
    /// population count.
    pub fn edit(&mut self, id: EventId, name: &str, date: &str) -> RepoResult<Event> {
        let (name, date) = validate_input(name, date, self.clock.today())?;
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or(RepoError::NotFound(id))?;

        let updated = Event::with_id(id, name, date, self.events[index].created_at);
        self.store.update(&updated)?;

        // The write runs to completion before any other mutation can start, so
        // the captured index still addresses the same entry.
        self.events[index] = updated.clone();
        self.refilter();
        info!("event=event_edit module=repo status=ok id={id}");
        Ok(updated)
    }

    /// Deletes by id. Persists the deletion first; an absent id is a no-op
    /// success.
    pub fn remove(&mut self, id: EventId) -> RepoResult<()> {
        self.store.remove(id)?;

        if let Some(index) = self.events.iter().position(|event| event.id == id) {
            self.events.remove(index);
            self.refilter();
            info!("event=event_remove module=repo status=ok id={id}");
        }
        Ok(())
    }

    /// Replaces the filtered view with events matching `term`.
    ///
    /// Matching is a case-insensitive substring test on the name, or a literal
    /// substring test on the ISO date text. An empty term selects everything.
    /// The result is always sorted ascending by date, soonest first.
    pub fn filter(&mut self, term: &str) -> &[Event] {
        self.search_term = term.to_string();
        self.refilter();
        &self.filtered
    }

    fn refilter(&mut self) {
        let term_lower = self.search_term.to_lowercase();
        self.filtered = if self.search_term.is_empty() {
            self.events.clone()
        } else {
            self.events
                .iter()
                .filter(|event| {
                    event.name.to_lowercase().contains(&term_lower)
                        || event.date_text().contains(&self.search_term)
                })
                .cloned()
                .collect()
        };
        self.filtered
            .sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
    }

    /// Authoritative list, newest-created-first by default.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Current filtered view, date-ascending.
    pub fn filtered(&self) -> &[Event] {
        &self.filtered
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Current calendar day from the injected clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}
