use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use daytally_core::db::open_db_in_memory;
use daytally_core::{Event, EventStore, SqliteEventStore, StoreError};
use rusqlite::Connection;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_time(NaiveTime::MIN).and_utc()
}

fn sample(name: &str, target: NaiveDate) -> Event {
    Event::new(name, target, midnight(2026, 1, 1))
}

#[test]
fn insert_and_load_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEventStore::try_new(&conn).unwrap();

    let event = sample("release day", date(2026, 7, 9));
    store.insert(&event).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, vec![event]);
}

#[test]
fn insert_duplicate_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEventStore::try_new(&conn).unwrap();

    let event = sample("release day", date(2026, 7, 9));
    store.insert(&event).unwrap();

    let err = store.insert(&event).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(id) if id == event.id));
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn insert_reports_non_key_constraints_as_write_failures() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_reserved_names BEFORE INSERT ON events
         WHEN NEW.name = 'reserved'
         BEGIN SELECT RAISE(ABORT, 'reserved name'); END;",
    )
    .unwrap();

    let store = SqliteEventStore::try_new(&conn).unwrap();
    let err = store
        .insert(&sample("reserved", date(2026, 7, 9)))
        .unwrap_err();
    assert!(matches!(err, StoreError::WriteFailed(_)));
}

#[test]
fn update_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEventStore::try_new(&conn).unwrap();

    let mut event = sample("draft name", date(2026, 7, 9));
    store.insert(&event).unwrap();

    event.name = "final name".to_string();
    event.date = date(2026, 8, 1);
    store.update(&event).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, vec![event]);
}

#[test]
fn update_creates_missing_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEventStore::try_new(&conn).unwrap();

    let event = sample("never inserted", date(2026, 7, 9));
    store.update(&event).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![event]);
}

#[test]
fn remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEventStore::try_new(&conn).unwrap();

    let event = sample("short lived", date(2026, 7, 9));
    store.insert(&event).unwrap();

    store.remove(event.id).unwrap();
    store.remove(event.id).unwrap();
    store.remove(Uuid::new_v4()).unwrap();

    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn load_all_rejects_corrupt_id_row() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO events (id, name, date, created_at)
         VALUES ('not-a-uuid', 'corrupt', '2026-07-09', 0);",
        [],
    )
    .unwrap();

    let store = SqliteEventStore::try_new(&conn).unwrap();
    let err = store.load_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn load_all_rejects_corrupt_date_row() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO events (id, name, date, created_at)
         VALUES (?1, 'corrupt', 'July 9th', 0);",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let store = SqliteEventStore::try_new(&conn).unwrap();
    let err = store.load_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteEventStore::try_new(&conn).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn store_rejects_connection_without_events_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();

    let err = SqliteEventStore::try_new(&conn).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
