//! Mirrors the cache store to durable storage
//!
//! The whole store is written as one JSON record under a single key chosen
//! when the adapter is built. Loading never fails: a missing record yields
//! the empty store and so does a record that no longer parses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::storage::KeyValueStore;
use super::store::CacheStore;

/// Key the cache snapshot is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "cache_store";

/// Errors that can occur reading or writing the snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying storage failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// On-disk wrapper around the store
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    /// When the snapshot was written
    saved_at: DateTime<Utc>,
    /// The cache contents
    store: S,
}

/// A snapshot read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub store: CacheStore,
    pub saved_at: DateTime<Utc>,
}

/// Saves and restores the cache store under one fixed key
///
/// The key is taken once at construction and both directions read that same
/// field, so a save can never land somewhere a load will not look.
pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(storage: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    /// Creates an adapter using [`DEFAULT_STORAGE_KEY`]
    pub fn with_default_key(storage: impl KeyValueStore + 'static) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the whole store, replacing the previous snapshot
    pub fn try_save(&self, store: &CacheStore) -> Result<(), StorageError> {
        let envelope = Envelope {
            saved_at: Utc::now(),
            store,
        };
        let json = serde_json::to_string(&envelope)?;
        self.storage.set(&self.key, &json)?;
        debug!(key = %self.key, "cache snapshot saved");
        Ok(())
    }

    /// Writes the whole store, logging instead of failing
    pub fn save(&self, store: &CacheStore) {
        if let Err(err) = self.try_save(store) {
            warn!(key = %self.key, error = %err, "failed to persist cache snapshot");
        }
    }

    /// Reads the snapshot, surfacing storage and parse failures
    ///
    /// `Ok(None)` means nothing has been saved under the key yet.
    pub fn try_load(&self) -> Result<Option<Snapshot>, StorageError> {
        let Some(json) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let envelope: Envelope<CacheStore> = serde_json::from_str(&json)?;
        Ok(Some(Snapshot {
            store: envelope.store,
            saved_at: envelope.saved_at,
        }))
    }

    /// Reads the snapshot, falling back to `None` on any failure
    pub fn load_snapshot(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding unreadable cache snapshot");
                None
            }
        }
    }

    /// Restores the store, or the empty store if nothing usable is saved
    pub fn load(&self) -> CacheStore {
        self.load_snapshot()
            .map(|snapshot| snapshot.store)
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
