// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the conference paper reviewing service.
//!
//! Conferences are stored whole, as one JSON snapshot per conference, next
//! to an append-only audit log. Every transition writes both inside a
//! single transaction, so the log and the current state never disagree.
//!
//! The only supported backend is `SQLite`. Tests use a fresh shared
//! in-memory database per [`Persistence`] instance; the server opens a
//! file-backed database in WAL mode.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
pub mod retry;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use confreview::TransitionResult;
use confreview_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use confreview_domain::{Conference, ConferenceId};
use diesel::prelude::*;
use diesel::upsert::excluded;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::{audit_events, conference_snapshots};

pub use error::PersistenceError;
pub use retry::{MAX_CONFLICT_ATTEMPTS, with_conflict_retry};

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Row of the `audit_events` table.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    conference_id: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    #[allow(dead_code)]
    created_at: String,
}

/// Identifier and title of a stored conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceSummary {
    pub id: String,
    pub title: String,
}

/// Persistence adapter for conference snapshots and audit events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Stores a conference, replacing any existing snapshot.
    ///
    /// No audit event is written; use [`Self::persist_transition`] for
    /// changes made through operations.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidConference`] if the conference
    /// breaks a folder constraint, or an error if serialization or the write
    /// fails.
    pub fn save_conference(&mut self, conference: &Conference) -> Result<(), PersistenceError> {
        upsert_snapshot(&mut self.conn, conference)
    }

    /// Loads the current snapshot of a conference.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ConferenceNotFound`] if no snapshot is
    /// stored, or an error if the snapshot cannot be read.
    pub fn load_conference(&mut self, id: &ConferenceId) -> Result<Conference, PersistenceError> {
        let state_json: Option<String> = conference_snapshots::table
            .filter(conference_snapshots::conference_id.eq(id.as_str()))
            .select(conference_snapshots::state_json)
            .first::<String>(&mut self.conn)
            .optional()?;

        let state_json: String =
            state_json.ok_or_else(|| PersistenceError::ConferenceNotFound(id.to_string()))?;
        Ok(serde_json::from_str(&state_json)?)
    }

    /// Lists every stored conference, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_conferences(&mut self) -> Result<Vec<ConferenceSummary>, PersistenceError> {
        let rows: Vec<(String, String)> = conference_snapshots::table
            .select((conference_snapshots::conference_id, conference_snapshots::title))
            .order(conference_snapshots::conference_id.asc())
            .load(&mut self.conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| ConferenceSummary { id, title })
            .collect())
    }

    /// Persists a transition: the new conference snapshot and its audit
    /// event, atomically.
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails; neither is kept in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        let conference: &Conference = &result.new_state.conference;
        let event: &AuditEvent = &result.audit_event;

        let event_id: i64 = self
            .conn
            .transaction::<i64, PersistenceError, _>(|conn| {
                upsert_snapshot(conn, conference)?;
                insert_audit_event(conn, event)
            })?;

        debug!(
            event_id,
            conference = %conference.id,
            action = %event.action.name,
            "Persisted transition"
        );
        Ok(event_id)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::EventNotFound`] if no such event exists.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        let row: Option<AuditEventRow> = audit_events::table
            .filter(audit_events::event_id.eq(event_id))
            .select(AuditEventRow::as_select())
            .first::<AuditEventRow>(&mut self.conn)
            .optional()?;

        row.map_or(Err(PersistenceError::EventNotFound(event_id)), row_to_event)
    }

    /// Retrieves the audit timeline of a conference, oldest event first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn get_audit_timeline(
        &mut self,
        conference: &ConferenceId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        let rows: Vec<AuditEventRow> = audit_events::table
            .filter(audit_events::conference_id.eq(conference.as_str()))
            .order(audit_events::event_id.asc())
            .select(AuditEventRow::as_select())
            .load(&mut self.conn)?;

        rows.into_iter().map(row_to_event).collect()
    }

    /// Stores a set of conferences, retrying each write on conflict.
    ///
    /// # Returns
    ///
    /// The number of conferences stored.
    ///
    /// # Errors
    ///
    /// Returns the first non-conflict error, or the conflict that persisted
    /// through [`MAX_CONFLICT_ATTEMPTS`] attempts.
    pub fn initialize_fixtures(
        &mut self,
        conferences: &[Conference],
    ) -> Result<usize, PersistenceError> {
        for conference in conferences {
            with_conflict_retry(MAX_CONFLICT_ATTEMPTS, || self.save_conference(conference))?;
        }
        info!(count = conferences.len(), "Loaded conference fixtures");
        Ok(conferences.len())
    }
}

fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn upsert_snapshot(
    conn: &mut SqliteConnection,
    conference: &Conference,
) -> Result<(), PersistenceError> {
    conference
        .validate()
        .map_err(|err| PersistenceError::InvalidConference {
            conference: conference.id.to_string(),
            reason: err.to_string(),
        })?;
    let state_json: String = serde_json::to_string(conference)?;
    let updated_at: String = now_timestamp()?;

    diesel::insert_into(conference_snapshots::table)
        .values((
            conference_snapshots::conference_id.eq(conference.id.as_str()),
            conference_snapshots::title.eq(&conference.title),
            conference_snapshots::state_json.eq(&state_json),
            conference_snapshots::updated_at.eq(&updated_at),
        ))
        .on_conflict(conference_snapshots::conference_id)
        .do_update()
        .set((
            conference_snapshots::title.eq(excluded(conference_snapshots::title)),
            conference_snapshots::state_json.eq(excluded(conference_snapshots::state_json)),
            conference_snapshots::updated_at.eq(excluded(conference_snapshots::updated_at)),
        ))
        .execute(conn)?;

    Ok(())
}

fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };
    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };
    let before_data: StateSnapshotData = StateSnapshotData {
        data: event.before.data.clone(),
    };
    let after_data: StateSnapshotData = StateSnapshotData {
        data: event.after.data.clone(),
    };

    let created_at: String = now_timestamp()?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::conference_id.eq(event.conference.as_str()),
            audit_events::actor_json.eq(serde_json::to_string(&actor_data)?),
            audit_events::cause_json.eq(serde_json::to_string(&cause_data)?),
            audit_events::action_json.eq(serde_json::to_string(&action_data)?),
            audit_events::before_snapshot_json.eq(serde_json::to_string(&before_data)?),
            audit_events::after_snapshot_json.eq(serde_json::to_string(&after_data)?),
            audit_events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

fn row_to_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let conference: ConferenceId = ConferenceId::new(&row.conference_id)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(AuditEvent::new(
        conference,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    )
    .with_id(row.event_id))
}
