//! In-memory storage implementation.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. Use this for tests, the conformance suite, and ephemeral
//! deployments. Semantics match [`SqliteStorage`] exactly, including the
//! name-uniqueness [`StorageError::Conflict`] that the identity resolver
//! depends on.
//!
//! [`SqliteStorage`]: super::sqlite::SqliteStorage

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use cradlelog::STORAGE_TIME_FORMAT;

use super::{
    Caregiver, NewRecord, RecordFilter, RecordPatch, SettingsUpdate, Storage, StorageError,
    StoredRecord, StoredSettings,
};

fn now_stamp() -> String {
    // Same shape as SQLite's CURRENT_TIMESTAMP (UTC, second precision).
    Utc::now().format(STORAGE_TIME_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

struct Inner {
    next_caregiver_id: i64,
    next_record_id: i64,
    /// Keyed by caregiver id; iteration order is id order, which is also
    /// creation order.
    caregivers: BTreeMap<i64, Caregiver>,
    records: BTreeMap<i64, StoredRecord>,
    settings: Option<StoredSettings>,
}

impl Inner {
    fn new() -> Self {
        Self {
            next_caregiver_id: 1,
            next_record_id: 1,
            caregivers: BTreeMap::new(),
            records: BTreeMap::new(),
            settings: None,
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`Storage`].
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for MemoryStorage {
    // --- Caregivers ----------------------------------------------------------

    async fn find_caregiver(&self, name: &str) -> Result<Option<Caregiver>, StorageError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .caregivers
            .values()
            .find(|c| c.caregiver_name == name)
            .cloned())
    }

    async fn get_caregiver(&self, caregiver_id: i64) -> Result<Option<Caregiver>, StorageError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.caregivers.get(&caregiver_id).cloned())
    }

    async fn insert_caregiver(&self, name: &str) -> Result<i64, StorageError> {
        let mut inner = self.inner.write().unwrap();
        if inner.caregivers.values().any(|c| c.caregiver_name == name) {
            return Err(StorageError::Conflict(format!(
                "caregiver {name:?} already exists"
            )));
        }
        let caregiver_id = inner.next_caregiver_id;
        inner.next_caregiver_id += 1;
        inner.caregivers.insert(
            caregiver_id,
            Caregiver {
                caregiver_id,
                caregiver_name: name.to_string(),
                created_at: now_stamp(),
            },
        );
        Ok(caregiver_id)
    }

    // --- Records -------------------------------------------------------------

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>, StorageError> {
        let inner = self.inner.read().unwrap();
        let mut records: Vec<StoredRecord> = inner
            .records
            .values()
            .filter(|r| {
                if let Some(id) = filter.caregiver_id {
                    if r.caregiver_id != id {
                        return false;
                    }
                }
                if let Some(name) = &filter.caregiver_name {
                    if r.caregiver_name != *name {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        // Time descending; ties keep insertion order via the ascending id.
        records.sort_by(|a, b| {
            b.time
                .cmp(&a.time)
                .then_with(|| a.record_id.cmp(&b.record_id))
        });
        Ok(records)
    }

    async fn get_record(&self, record_id: i64) -> Result<Option<StoredRecord>, StorageError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(&record_id).cloned())
    }

    async fn insert_record(&self, new: &NewRecord) -> Result<i64, StorageError> {
        let mut inner = self.inner.write().unwrap();
        let caregiver_name = inner
            .caregivers
            .get(&new.caregiver_id)
            .map(|c| c.caregiver_name.clone())
            .ok_or_else(|| {
                StorageError::Internal(format!("caregiver {} does not exist", new.caregiver_id))
            })?;

        let record_id = inner.next_record_id;
        inner.next_record_id += 1;
        inner.records.insert(
            record_id,
            StoredRecord {
                record_id,
                caregiver_id: new.caregiver_id,
                caregiver_name,
                time: new.time.clone(),
                event: new.event,
                notes: new.notes.clone(),
            },
        );
        Ok(record_id)
    }

    async fn update_record(
        &self,
        record_id: i64,
        patch: &RecordPatch,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap();
        let record = inner
            .records
            .get_mut(&record_id)
            .ok_or(StorageError::NotFound)?;
        record.time = patch.time.clone();
        record.event = patch.event;
        record.notes = patch.notes.clone();
        Ok(())
    }

    async fn delete_record(&self, record_id: i64) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap();
        inner
            .records
            .remove(&record_id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    // --- Settings ------------------------------------------------------------

    async fn get_settings(&self) -> Result<Option<StoredSettings>, StorageError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.settings.clone())
    }

    async fn put_settings(&self, update: &SettingsUpdate) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap();
        inner.settings = Some(StoredSettings {
            feeding_interval: update.feeding_interval,
            pumping_interval: update.pumping_interval,
            last_modified_by: update.modified_by.clone(),
            updated_at: now_stamp(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
