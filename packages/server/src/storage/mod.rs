//! Storage abstraction layer for the cradlelog server.
//!
//! The [`Storage`] trait defines the contract between the HTTP handler layer
//! and persistence. All validation and timestamp normalization happens in
//! the handlers before a storage call; storage is purely a data access layer
//! returning typed rows.
//!
//! # Implementations
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`MemoryStorage`] | Tests, conformance suite, ephemeral deployments |
//! | [`SqliteStorage`] | Production; durable single-file database |
//!
//! [`MemoryStorage`]: memory::MemoryStorage
//! [`SqliteStorage`]: sqlite::SqliteStorage

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use cradlelog::EventKind;

/// The sentinel key identifying the single shared settings row.
pub const SETTINGS_KEY: &str = "global";

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested row does not exist (or an update/delete matched nothing).
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint rejected the write (duplicate caregiver name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected error in the underlying storage backend.
    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

/// A caregiver row. Created on first login with a given name; never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caregiver {
    pub caregiver_id: i64,
    pub caregiver_name: String,
    pub created_at: String,
}

/// A record row joined with its caregiver's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub record_id: i64,
    pub caregiver_id: i64,
    pub caregiver_name: String,
    /// Normalized storage representation (`YYYY-MM-DD HH:MM:SS`).
    pub time: String,
    pub event: EventKind,
    pub notes: String,
}

/// Fields for a record insert. `time` must already be normalized.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub caregiver_id: i64,
    pub time: String,
    pub event: EventKind,
    pub notes: String,
}

/// Replacement fields for a record update. A full replace: all three fields
/// are written, and the row's `updated_at` is refreshed.
#[derive(Debug, Clone)]
pub struct RecordPatch {
    pub time: String,
    pub event: EventKind,
    pub notes: String,
}

/// Query filter for [`Storage::list_records`], built by the list handler
/// from URL query parameters. Both fields `None` means all records.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Include only records belonging to this caregiver id.
    pub caregiver_id: Option<i64>,
    /// Include only records whose caregiver's name exactly matches.
    pub caregiver_name: Option<String>,
}

/// The single shared settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSettings {
    pub feeding_interval: i64,
    pub pumping_interval: i64,
    pub last_modified_by: String,
    pub updated_at: String,
}

/// Fields for a settings upsert; `updated_at` is stamped by the store.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub feeding_interval: i64,
    pub pumping_interval: i64,
    pub modified_by: String,
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

/// The persistence contract for the cradlelog server.
///
/// All methods are `async` and return `Result<_, StorageError>`.
/// Implementations must be `Send + Sync + 'static` so they can be held in an
/// `Arc<dyn Storage>`. Each operation is a single atomic statement; there
/// are no multi-statement transactions to manage.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // --- Caregivers ----------------------------------------------------------

    /// Look up a caregiver by exact (trimmed) name. Returns `None` if absent.
    async fn find_caregiver(&self, name: &str) -> Result<Option<Caregiver>, StorageError>;

    /// Look up a caregiver by id. Returns `None` if absent.
    async fn get_caregiver(&self, caregiver_id: i64) -> Result<Option<Caregiver>, StorageError>;

    /// Insert a new caregiver and return its assigned id.
    ///
    /// Returns [`StorageError::Conflict`] when the name already exists —
    /// the uniqueness constraint guarantees at most one row per name even
    /// under concurrent inserts. Callers resolve the race by re-reading
    /// (see [`crate::identity::resolve_or_create`]).
    async fn insert_caregiver(&self, name: &str) -> Result<i64, StorageError>;

    // --- Records -------------------------------------------------------------

    /// Return records matching `filter`, ordered by `time` descending with
    /// ties broken by `record_id` ascending (insertion order). Unbounded.
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>, StorageError>;

    /// Retrieve a record by id. Returns `None` if not found.
    async fn get_record(&self, record_id: i64) -> Result<Option<StoredRecord>, StorageError>;

    /// Insert a record and return its assigned id. The caregiver reference
    /// must already be resolved to an existing id.
    async fn insert_record(&self, new: &NewRecord) -> Result<i64, StorageError>;

    /// Replace `time`, `event`, and `notes` on an existing record.
    /// Returns [`StorageError::NotFound`] when no row matched.
    async fn update_record(&self, record_id: i64, patch: &RecordPatch)
        -> Result<(), StorageError>;

    /// Delete a record. Returns [`StorageError::NotFound`] when no row
    /// matched (deleting twice fails the second time).
    async fn delete_record(&self, record_id: i64) -> Result<(), StorageError>;

    // --- Settings ------------------------------------------------------------

    /// Return the shared settings row, or `None` if nobody has written one.
    /// Absence is not an error; the handler synthesizes defaults.
    async fn get_settings(&self) -> Result<Option<StoredSettings>, StorageError>;

    /// Upsert the shared settings row keyed on [`SETTINGS_KEY`], overwriting
    /// every field and refreshing `updated_at`.
    async fn put_settings(&self, update: &SettingsUpdate) -> Result<(), StorageError>;
}
