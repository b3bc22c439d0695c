use chrono::NaiveDate;
use daytally_core::db::open_db_in_memory;
use daytally_core::{
    EditSession, EventRepository, FixedClock, RepoError, SqliteEventStore, ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
}

fn repo(conn: &Connection) -> EventRepository<SqliteEventStore<'_>, FixedClock> {
    EventRepository::new(
        SqliteEventStore::try_new(conn).unwrap(),
        FixedClock::new(today()),
    )
}

#[test]
fn start_seeds_draft_from_committed_values() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("launch", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    let displaced = session.start(&event);

    assert_eq!(displaced, None);
    assert!(session.is_editing(event.id));
    let draft = session.draft().unwrap();
    assert_eq!(draft.name, "launch");
    assert_eq!(draft.date, "2026-06-01");
}

#[test]
fn starting_second_edit_displaces_first() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let a = repo.add("event a", "2026-06-01").unwrap();
    let b = repo.add("event b", "2026-06-02").unwrap();

    let mut session = EditSession::new();
    session.start(&a);
    session.set_draft("half-typed rename", "2026-06-09");

    let displaced = session.start(&b);

    assert_eq!(displaced, Some(a.id));
    assert!(session.is_editing(b.id));
    // A's committed values are unaffected by the discarded draft
    assert_eq!(repo.get(a.id).unwrap().name, "event a");
    assert_eq!(repo.get(a.id).unwrap().date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
}

#[test]
fn restarting_same_event_reseeds_the_draft() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("launch", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    session.start(&event);
    session.set_draft("scratch", "2026-09-09");

    let displaced = session.start(&event);
    assert_eq!(displaced, None);
    assert_eq!(session.draft().unwrap().name, "launch");
}

#[test]
fn cancel_requires_the_active_id() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("launch", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    session.start(&event);

    assert!(!session.cancel(Uuid::new_v4()));
    assert!(session.is_editing(event.id));

    assert!(session.cancel(event.id));
    assert_eq!(session.editing_id(), None);
    assert_eq!(repo.get(event.id).unwrap().name, "launch");
}

#[test]
fn commit_applies_draft_and_returns_to_viewing() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("working title", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    session.start(&event);
    session.set_draft("final title", "2026-07-01");

    let updated = session.commit(event.id, &mut repo).unwrap();

    assert_eq!(session.editing_id(), None);
    assert_eq!(updated.id, event.id);
    assert_eq!(updated.created_at, event.created_at);
    assert_eq!(repo.get(event.id).unwrap().name, "final title");

    let mut reloaded = self::repo(&conn);
    reloaded.load().unwrap();
    assert_eq!(reloaded.events()[0].name, "final title");
}

#[test]
fn commit_with_empty_name_keeps_draft_for_correction() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("launch", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    session.start(&event);
    session.set_draft("", "2026-07-01");

    let err = session.commit(event.id, &mut repo).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField)
    ));

    // still editing, invalid draft retained so the user can fix it
    assert!(session.is_editing(event.id));
    let draft = session.draft().unwrap();
    assert_eq!(draft.name, "");
    assert_eq!(draft.date, "2026-07-01");
    assert_eq!(repo.get(event.id).unwrap().name, "launch");
}

#[test]
fn commit_without_active_draft_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("launch", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    let err = session.commit(event.id, &mut repo).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn commit_after_delete_discards_draft() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = repo(&conn);
    let event = repo.add("doomed", "2026-06-01").unwrap();

    let mut session = EditSession::new();
    session.start(&event);
    repo.remove(event.id).unwrap();

    let err = session.commit(event.id, &mut repo).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == event.id));
    // nothing left to edit, the session returns to viewing
    assert_eq!(session.editing_id(), None);
    assert!(repo.is_empty());
}
