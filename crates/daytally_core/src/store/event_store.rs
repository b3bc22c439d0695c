//! Event store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD for event records, keyed by `id`.
//! - Surface a typed failure taxonomy to the repository layer.
//!
//! # Invariants
//! - `insert` never overwrites; duplicate ids are rejected.
//! - `update` is an upsert; `remove` is idempotent.
//! - `load_all` returns records in unspecified storage order; callers sort.

use crate::db::DbError;
use crate::model::event::{Event, EventId, DATE_FORMAT};
use chrono::{DateTime, NaiveDate};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT id, name, date, created_at FROM events";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure taxonomy for durable event storage.
#[derive(Debug)]
pub enum StoreError {
    /// The storage engine cannot be used at all (unopened, unmigrated, or
    /// missing its collection). Callers should degrade to read-only mode.
    Unavailable(String),
    /// `insert` collided with an existing id.
    DuplicateKey(EventId),
    /// The engine reported a failure while executing an operation.
    WriteFailed(DbError),
    /// A persisted row could not be decoded into a valid event.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "event store unavailable: {reason}"),
            Self::DuplicateKey(id) => write!(f, "event id already exists: {id}"),
            Self::WriteFailed(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WriteFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::WriteFailed(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::WriteFailed(DbError::Sqlite(value))
    }
}

/// Persistence contract for event records.
///
/// Implementations complete each call with success or a typed failure; the
/// repository layer depends on nothing beyond that.
pub trait EventStore {
    /// Stores a new record. Fails with `DuplicateKey` if `id` exists.
    fn insert(&self, event: &Event) -> StoreResult<()>;
    /// Upsert: creates the record if absent, otherwise overwrites all fields.
    fn update(&self, event: &Event) -> StoreResult<()>;
    /// Deletes by id. Succeeds even when the id is absent.
    fn remove(&self, id: EventId) -> StoreResult<()>;
    /// Returns all records in unspecified storage order.
    fn load_all(&self) -> StoreResult<Vec<Event>>;
}

/// SQLite-backed event store.
#[derive(Debug)]
pub struct SqliteEventStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventStore<'conn> {
    /// Wraps a connection after verifying the schema handshake.
    ///
    /// # Errors
    /// - `Unavailable` when no migration has been applied or the `events`
    ///   table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if version == 0 {
            return Err(StoreError::Unavailable(
                "schema not initialized; open the database through db::open_db".to_string(),
            ));
        }

        let has_events_table: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1
                    FROM sqlite_master
                    WHERE type = 'table' AND name = 'events'
                );",
                [],
                |row| row.get(0),
            )
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if has_events_table == 0 {
            return Err(StoreError::Unavailable(
                "events table missing from schema".to_string(),
            ));
        }

        Ok(Self { conn })
    }
}

impl EventStore for SqliteEventStore<'_> {
    fn insert(&self, event: &Event) -> StoreResult<()> {
        let result = self.conn.execute(
            "INSERT INTO events (id, name, date, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                event.id.to_string(),
                event.name.as_str(),
                event.date_text(),
                event.created_at.timestamp_millis(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            // A text primary key conflict surfaces as SQLITE_CONSTRAINT_UNIQUE
            // on rowid tables; other constraint classes are plain write errors.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::DuplicateKey(event.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, event: &Event) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO events (id, name, date, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                date = excluded.date,
                created_at = excluded.created_at;",
            params![
                event.id.to_string(),
                event.name.as_str(),
                event.date_text(),
                event.created_at.timestamp_millis(),
            ],
        )?;

        Ok(())
    }

    fn remove(&self, id: EventId) -> StoreResult<()> {
        // Deleting an absent id is a no-op success.
        self.conn
            .execute("DELETE FROM events WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn load_all(&self) -> StoreResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!("{EVENT_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }
}

fn parse_event_row(row: &Row<'_>) -> StoreResult<Event> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid id value `{id_text}` in events.id"))
    })?;

    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        StoreError::InvalidData(format!("invalid date value `{date_text}` in events.date"))
    })?;

    let created_at_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::from_timestamp_millis(created_at_ms).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid timestamp `{created_at_ms}` in events.created_at"
        ))
    })?;

    Ok(Event {
        id,
        name: row.get("name")?,
        date,
        created_at,
    })
}
