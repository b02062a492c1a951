//! SQLite-backed storage implementation.
//!
//! Uses `rusqlite` (with bundled SQLite) wrapped in an `Arc<Mutex<Connection>>`
//! to satisfy the `Send + Sync` requirements. All blocking calls are offloaded
//! to a thread-pool via `tokio::task::spawn_blocking`; the mutex guard lives
//! only inside the closure, so an error path never holds the connection.
//!
//! # Schema
//!
//! - `caregivers` — one row per distinct name; `caregiver_name` is UNIQUE,
//!   which is what makes concurrent logins for a new name safe.
//! - `records` — the event log, FK to `caregivers` with `ON DELETE CASCADE`.
//! - `settings` — at most one row, keyed by the `"global"` sentinel.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cradlelog::EventKind;
use rusqlite::{params, Connection, Row};

use super::{
    Caregiver, NewRecord, RecordFilter, RecordPatch, SettingsUpdate, Storage, StorageError,
    StoredRecord, StoredSettings, SETTINGS_KEY,
};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS caregivers (
    caregiver_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    caregiver_name TEXT NOT NULL UNIQUE,
    created_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS records (
    record_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    caregiver_id INTEGER NOT NULL,
    time         TEXT NOT NULL,
    event        TEXT NOT NULL,
    notes        TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (caregiver_id) REFERENCES caregivers(caregiver_id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_records_caregiver ON records(caregiver_id);
CREATE INDEX IF NOT EXISTS idx_records_time      ON records(time);

CREATE TABLE IF NOT EXISTS settings (
    caregiver_name   TEXT PRIMARY KEY,
    feeding_interval INTEGER NOT NULL,
    pumping_interval INTEGER NOT NULL,
    last_modified_by TEXT NOT NULL,
    updated_at       TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

/// Record projection shared by every record read, joined for the display name.
const RECORD_SELECT: &str = "SELECT r.record_id, r.caregiver_id, c.caregiver_name, r.time, \
                             r.event, r.notes
                             FROM records r
                             JOIN caregivers c ON r.caregiver_id = c.caregiver_id";

// ---------------------------------------------------------------------------
// SqliteStorage
// ---------------------------------------------------------------------------

/// SQLite-backed implementation of [`Storage`].
///
/// Holds a single database connection protected by a `Mutex`. All operations
/// run inside `spawn_blocking` to avoid blocking the async runtime.
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) the SQLite database at `path` and apply the schema.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory SQLite database (data is lost when dropped).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        // Foreign keys are off by default in SQLite; the caregiver→records
        // cascade depends on them.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

// ---------------------------------------------------------------------------
// Error conversions
// ---------------------------------------------------------------------------

fn map_err(e: rusqlite::Error) -> StorageError {
    StorageError::Internal(e.to_string())
}

/// Like [`map_err`], but surfaces a uniqueness violation as
/// [`StorageError::Conflict`] so the identity resolver can retry-as-lookup.
fn map_constraint_err(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e {
        if err.code == rusqlite::ErrorCode::ConstraintViolation {
            return StorageError::Conflict(
                msg.clone().unwrap_or_else(|| "constraint violation".into()),
            );
        }
    }
    map_err(e)
}

/// Decode one row of [`RECORD_SELECT`] into a typed record.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    let event_raw: String = row.get(4)?;
    let event: EventKind = event_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(StoredRecord {
        record_id: row.get(0)?,
        caregiver_id: row.get(1)?,
        caregiver_name: row.get(2)?,
        time: row.get(3)?,
        event,
        notes: row.get(5)?,
    })
}

fn row_to_caregiver(row: &Row<'_>) -> rusqlite::Result<Caregiver> {
    Ok(Caregiver {
        caregiver_id: row.get(0)?,
        caregiver_name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Dynamic query parameter helper
// ---------------------------------------------------------------------------

/// Typed SQL parameter for building dynamic WHERE clauses.
enum SqlParam {
    Text(String),
    Integer(i64),
}

impl rusqlite::ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value};
        match self {
            SqlParam::Text(s) => Ok(ToSqlOutput::Owned(Value::Text(s.clone()))),
            SqlParam::Integer(i) => Ok(ToSqlOutput::Owned(Value::Integer(*i))),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for SqliteStorage {
    // --- Caregivers ----------------------------------------------------------

    async fn find_caregiver(&self, name: &str) -> Result<Option<Caregiver>, StorageError> {
        let conn = Arc::clone(&self.conn);
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let result = conn.query_row(
                "SELECT caregiver_id, caregiver_name, created_at
                 FROM caregivers WHERE caregiver_name = ?1",
                params![name],
                row_to_caregiver,
            );
            match result {
                Ok(c) => Ok(Some(c)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_err(e)),
            }
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn get_caregiver(&self, caregiver_id: i64) -> Result<Option<Caregiver>, StorageError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let result = conn.query_row(
                "SELECT caregiver_id, caregiver_name, created_at
                 FROM caregivers WHERE caregiver_id = ?1",
                params![caregiver_id],
                row_to_caregiver,
            );
            match result {
                Ok(c) => Ok(Some(c)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_err(e)),
            }
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn insert_caregiver(&self, name: &str) -> Result<i64, StorageError> {
        let conn = Arc::clone(&self.conn);
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            conn.execute(
                "INSERT INTO caregivers (caregiver_name) VALUES (?1)",
                params![name],
            )
            .map_err(map_constraint_err)?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    // --- Records -------------------------------------------------------------

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>, StorageError> {
        let conn = Arc::clone(&self.conn);
        let filter = filter.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();

            let mut sql = format!("{RECORD_SELECT} WHERE 1=1");
            let mut params_vec: Vec<SqlParam> = Vec::new();

            if let Some(id) = filter.caregiver_id {
                sql.push_str(" AND r.caregiver_id = ?");
                params_vec.push(SqlParam::Integer(id));
            }

            if let Some(name) = &filter.caregiver_name {
                sql.push_str(" AND c.caregiver_name = ?");
                params_vec.push(SqlParam::Text(name.clone()));
            }

            sql.push_str(" ORDER BY r.time DESC, r.record_id ASC");

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|p| p as &dyn rusqlite::ToSql).collect();

            let mut stmt = conn.prepare(&sql).map_err(map_err)?;
            let records = stmt
                .query_map(params_refs.as_slice(), row_to_record)
                .map_err(map_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_err)?;

            Ok(records)
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn get_record(&self, record_id: i64) -> Result<Option<StoredRecord>, StorageError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let result = conn.query_row(
                &format!("{RECORD_SELECT} WHERE r.record_id = ?1"),
                params![record_id],
                row_to_record,
            );
            match result {
                Ok(r) => Ok(Some(r)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_err(e)),
            }
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn insert_record(&self, new: &NewRecord) -> Result<i64, StorageError> {
        let conn = Arc::clone(&self.conn);
        let new = new.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            conn.execute(
                "INSERT INTO records (caregiver_id, time, event, notes)
                 VALUES (?1, ?2, ?3, ?4)",
                params![new.caregiver_id, new.time, new.event.as_str(), new.notes],
            )
            .map_err(map_err)?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn update_record(
        &self,
        record_id: i64,
        patch: &RecordPatch,
    ) -> Result<(), StorageError> {
        let conn = Arc::clone(&self.conn);
        let patch = patch.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let changed = conn
                .execute(
                    "UPDATE records
                     SET time = ?1, event = ?2, notes = ?3, updated_at = CURRENT_TIMESTAMP
                     WHERE record_id = ?4",
                    params![patch.time, patch.event.as_str(), patch.notes, record_id],
                )
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn delete_record(&self, record_id: i64) -> Result<(), StorageError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let changed = conn
                .execute(
                    "DELETE FROM records WHERE record_id = ?1",
                    params![record_id],
                )
                .map_err(map_err)?;
            if changed == 0 {
                return Err(StorageError::NotFound);
            }
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    // --- Settings ------------------------------------------------------------

    async fn get_settings(&self) -> Result<Option<StoredSettings>, StorageError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            let result = conn.query_row(
                "SELECT feeding_interval, pumping_interval, last_modified_by, updated_at
                 FROM settings WHERE caregiver_name = ?1",
                params![SETTINGS_KEY],
                |row| {
                    Ok(StoredSettings {
                        feeding_interval: row.get(0)?,
                        pumping_interval: row.get(1)?,
                        last_modified_by: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                },
            );
            match result {
                Ok(s) => Ok(Some(s)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_err(e)),
            }
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }

    async fn put_settings(&self, update: &SettingsUpdate) -> Result<(), StorageError> {
        let conn = Arc::clone(&self.conn);
        let update = update.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            conn.execute(
                "INSERT INTO settings
                   (caregiver_name, feeding_interval, pumping_interval, last_modified_by, updated_at)
                 VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
                 ON CONFLICT(caregiver_name) DO UPDATE SET
                   feeding_interval = excluded.feeding_interval,
                   pumping_interval = excluded.pumping_interval,
                   last_modified_by = excluded.last_modified_by,
                   updated_at       = CURRENT_TIMESTAMP",
                params![
                    SETTINGS_KEY,
                    update.feeding_interval,
                    update.pumping_interval,
                    update.modified_by,
                ],
            )
            .map_err(map_err)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Internal(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
