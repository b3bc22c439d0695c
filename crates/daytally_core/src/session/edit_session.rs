//! Edit session holding at most one draft.
//!
//! Every event is in the viewing state by default; starting an edit on a
//! second event silently cancels the first rather than erroring.

use crate::clock::Clock;
use crate::model::event::{Event, EventId};
use crate::repo::event_repo::{EventRepository, RepoError, RepoResult};
use crate::store::event_store::EventStore;
use log::debug;

/// Uncommitted field values for the event being edited.
///
/// Drafts hold raw strings: user input stays unvalidated text until commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: EventId,
    pub name: String,
    pub date: String,
}

/// At most one event in edit mode; everything else is viewing.
#[derive(Debug, Default)]
pub struct EditSession {
    active: Option<EditDraft>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the event currently in edit mode, if any.
    pub fn editing_id(&self) -> Option<EventId> {
        self.active.as_ref().map(|draft| draft.id)
    }

    pub fn is_editing(&self, id: EventId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.active.as_ref()
    }

    /// Puts `event` into edit mode, seeding the draft from committed values.
    ///
    /// Any other event currently in edit mode is implicitly cancelled; its id
    /// is returned so the caller can re-render that card.
    pub fn start(&mut self, event: &Event) -> Option<EventId> {
        let displaced = self
            .active
            .take()
            .filter(|draft| draft.id != event.id)
            .map(|draft| draft.id);
        if let Some(id) = displaced {
            debug!("event=edit_displaced module=session status=ok id={id}");
        }

        self.active = Some(EditDraft {
            id: event.id,
            name: event.name.clone(),
            date: event.date_text(),
        });
        displaced
    }

    /// Replaces the draft field values. Returns false when nothing is being
    /// edited.
    pub fn set_draft(&mut self, name: &str, date: &str) -> bool {
        match self.active.as_mut() {
            Some(draft) => {
                draft.name = name.to_string();
                draft.date = date.to_string();
                true
            }
            None => false,
        }
    }

    /// Discards the draft for `id` and returns to viewing.
    ///
    /// Returns false when `id` is not the event being edited; committed values
    /// are unaffected either way.
    pub fn cancel(&mut self, id: EventId) -> bool {
        if self.is_editing(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Commits the draft for `id` through the repository.
    ///
    /// On success the event returns to viewing. On validation or store failure
    /// the draft is preserved so the user can correct it. When the repository
    /// reports the event gone, the draft is discarded: there is nothing left
    /// to edit.
    pub fn commit<S: EventStore, C: Clock>(
        &mut self,
        id: EventId,
        repo: &mut EventRepository<S, C>,
    ) -> RepoResult<Event> {
        let draft = match self.active.as_ref() {
            Some(draft) if draft.id == id => draft.clone(),
            _ => return Err(RepoError::NotFound(id)),
        };

        match repo.edit(id, &draft.name, &draft.date) {
            Ok(event) => {
                self.active = None;
                Ok(event)
            }
            Err(err) => {
                if matches!(err, RepoError::NotFound(_)) {
                    self.active = None;
                }
                Err(err)
            }
        }
    }
}
