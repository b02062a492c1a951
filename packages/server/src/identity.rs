//! Caregiver identity resolution — the "login" operation.
//!
//! Maps a human-entered name to a stable caregiver id, creating the row on
//! first use. Concurrent first logins for the same new name race to insert;
//! the `caregiver_name` uniqueness constraint guarantees one winner, and the
//! loser resolves the conflict by re-reading. No application locking.

use crate::storage::{Storage, StorageError};

/// Resolve `name` to its caregiver id, inserting a new row if absent.
///
/// `name` must already be validated and trimmed
/// ([`cradlelog::validate_caregiver_name`]); the duplicate-key retry re-reads
/// with this same value, never with anything re-derived from the request.
///
/// A [`StorageError::Conflict`] from the insert means another request won
/// the race for this name — the expected outcome, resolved here by
/// returning the winning row's id, never surfaced to the caller.
pub async fn resolve_or_create(storage: &dyn Storage, name: &str) -> Result<i64, StorageError> {
    if let Some(c) = storage.find_caregiver(name).await? {
        return Ok(c.caregiver_id);
    }

    match storage.insert_caregiver(name).await {
        Ok(caregiver_id) => Ok(caregiver_id),
        Err(StorageError::Conflict(_)) => {
            let c = storage.find_caregiver(name).await?.ok_or_else(|| {
                StorageError::Internal(format!(
                    "caregiver {name:?} missing after duplicate-key retry"
                ))
            })?;
            Ok(c.caregiver_id)
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn same_name_resolves_to_same_id() {
        let s = MemoryStorage::new();
        let first = resolve_or_create(&s, "媽媽").await.unwrap();
        let second = resolve_or_create(&s, "媽媽").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn distinct_names_get_distinct_ids() {
        let s = MemoryStorage::new();
        let mom = resolve_or_create(&s, "媽媽").await.unwrap();
        let dad = resolve_or_create(&s, "爸爸").await.unwrap();
        assert_ne!(mom, dad);
    }

    #[tokio::test]
    async fn conflict_resolves_to_the_winning_row() {
        let s = MemoryStorage::new();
        // Simulate losing the race: the row appears between our lookup and
        // insert, so insert_caregiver reports Conflict and the resolver
        // must fall back to the winner's id.
        let winner = s.insert_caregiver("阿嬤").await.unwrap();
        assert!(matches!(
            s.insert_caregiver("阿嬤").await.unwrap_err(),
            StorageError::Conflict(_)
        ));
        let resolved = resolve_or_create(&s, "阿嬤").await.unwrap();
        assert_eq!(resolved, winner);
    }

    #[tokio::test]
    async fn concurrent_logins_agree_on_one_id() {
        let s = Arc::new(MemoryStorage::new());
        let a = {
            let s = Arc::clone(&s);
            tokio::spawn(async move { resolve_or_create(s.as_ref(), "阿公").await })
        };
        let b = {
            let s = Arc::clone(&s);
            tokio::spawn(async move { resolve_or_create(s.as_ref(), "阿公").await })
        };
        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a, b);
        // Exactly one row exists for the name afterwards.
        assert_eq!(
            s.find_caregiver("阿公").await.unwrap().unwrap().caregiver_id,
            a
        );
    }
}
