//! Controller wiring repository and edit session to a view collaborator.
//!
//! # Responsibility
//! - Translate user actions into repository/session operations.
//! - Report every outcome through the view; re-render after state changes.
//!
//! # Invariants
//! - The view never reads repository internals; it is driven by explicit
//!   render calls.
//! - No single failed operation is fatal; the controller stays interactive.
//! - When storage is unavailable the controller degrades to a disabled
//!   read-only state.

use crate::clock::{tomorrow, Clock};
use crate::model::event::{Event, EventId, ValidationError};
use crate::repo::event_repo::{EventRepository, RepoError};
use crate::session::edit_session::EditSession;
use crate::store::event_store::EventStore;
use chrono::NaiveDate;
use log::warn;

/// Severity channel for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Consumed view interface. Rendering and presentation mechanics live outside
/// the core.
pub trait View {
    /// Renders the filtered list along with total/capacity counters.
    fn render_list(&mut self, events: &[Event], total: usize, max_events: usize);
    /// Shows a transient user message.
    fn show_message(&mut self, text: &str, kind: MessageKind);
    /// Asks the user to confirm a destructive action.
    fn prompt_confirm(&mut self, text: &str) -> bool;
}

/// Orchestrates one repository, one edit session and one view.
pub struct EventController<S: EventStore, C: Clock, V: View> {
    repo: EventRepository<S, C>,
    session: EditSession,
    view: V,
    disabled: bool,
}

impl<S: EventStore, C: Clock, V: View> EventController<S, C, V> {
    pub fn new(repo: EventRepository<S, C>, view: V) -> Self {
        Self {
            repo,
            session: EditSession::new(),
            view,
            disabled: false,
        }
    }

    /// Loads the durable copy and renders the initial list.
    ///
    /// A load failure disables every mutating operation: nothing durable can
    /// proceed, so the controller degrades to read-only.
    pub fn initialize(&mut self) {
        match self.repo.load() {
            Ok(()) => self.render(),
            Err(err) => {
                self.disabled = true;
                warn!("event=controller_init module=controller status=degraded error={err}");
                self.view.show_message(
                    &format!("Storage is unavailable: {err}. Events cannot be saved."),
                    MessageKind::Error,
                );
                self.render();
            }
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Adds a new event from raw form input.
    pub fn add_event(&mut self, name: &str, date: &str) {
        if self.reject_when_disabled() {
            return;
        }
        match self.repo.add(name, date) {
            Ok(_) => {
                self.view
                    .show_message("Event added successfully", MessageKind::Success);
                self.render();
            }
            Err(err) => self.report(&err),
        }
    }

    /// Applies a search term to the filtered view.
    pub fn search(&mut self, term: &str) {
        self.repo.filter(term);
        self.render();
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Deletes an event after user confirmation. Declining is a no-op.
    pub fn delete_event(&mut self, id: EventId) {
        if self.reject_when_disabled() {
            return;
        }
        if !self
            .view
            .prompt_confirm("Are you sure you want to delete this event?")
        {
            return;
        }

        match self.repo.remove(id) {
            Ok(()) => {
                // A card cannot stay in edit mode after its event is gone.
                self.session.cancel(id);
                self.view.show_message("Event deleted", MessageKind::Success);
                self.render();
            }
            Err(err) => self.report(&err),
        }
    }

    /// Puts an event into edit mode, implicitly cancelling any other edit.
    pub fn start_edit(&mut self, id: EventId) {
        if self.reject_when_disabled() {
            return;
        }
        let Some(event) = self.repo.get(id).cloned() else {
            self.view.show_message("Event not found", MessageKind::Error);
            return;
        };
        self.session.start(&event);
        self.render();
    }

    /// Updates the active draft from the edit inputs.
    pub fn edit_draft(&mut self, name: &str, date: &str) {
        self.session.set_draft(name, date);
    }

    /// Discards the draft for `id` and re-renders in viewing mode.
    pub fn cancel_edit(&mut self, id: EventId) {
        if self.session.cancel(id) {
            self.render();
        }
    }

    /// Commits the draft for `id`. On validation failure the card stays in
    /// edit mode with the draft retained for correction.
    pub fn save_edit(&mut self, id: EventId) {
        if self.reject_when_disabled() {
            return;
        }
        match self.session.commit(id, &mut self.repo) {
            Ok(_) => {
                self.view
                    .show_message("Event updated successfully", MessageKind::Success);
                self.render();
            }
            Err(err) => self.report(&err),
        }
    }

    /// Default value for the date input: tomorrow. Used on load and after
    /// each successful add.
    pub fn default_date(&self) -> NaiveDate {
        tomorrow(self.repo.today())
    }

    pub fn editing_id(&self) -> Option<EventId> {
        self.session.editing_id()
    }

    pub fn repository(&self) -> &EventRepository<S, C> {
        &self.repo
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn render(&mut self) {
        let total = self.repo.len();
        let max_events = self.repo.max_events();
        self.view.render_list(self.repo.filtered(), total, max_events);
    }

    fn report(&mut self, err: &RepoError) {
        self.view.show_message(&user_message(err), MessageKind::Error);
    }

    fn reject_when_disabled(&mut self) -> bool {
        if self.disabled {
            self.view.show_message(
                "Storage is unavailable; changes are disabled",
                MessageKind::Error,
            );
        }
        self.disabled
    }
}

fn user_message(err: &RepoError) -> String {
    match err {
        RepoError::Validation(ValidationError::EmptyField) => {
            "Please fill in both the name and the date".to_string()
        }
        RepoError::Validation(ValidationError::InvalidDate(raw)) => {
            format!("`{raw}` is not a valid date")
        }
        RepoError::Validation(ValidationError::PastDate(_)) => {
            "That date has already passed".to_string()
        }
        RepoError::Validation(ValidationError::CapacityExceeded(max)) => {
            format!("Maximum of {max} events reached")
        }
        RepoError::NotFound(_) => "Event not found".to_string(),
        RepoError::Store(err) => format!("Could not save changes: {err}"),
    }
}
