//! Cache of the most recent query per category
//!
//! `CacheStore` holds one slot per query category in memory.
//! `PersistenceAdapter` mirrors the whole store to a `KeyValueStore` so the
//! last results survive a restart. The cache is advisory: nothing here answers
//! a query on its own.

mod persistence;
mod storage;
mod store;

pub use persistence::{PersistenceAdapter, Snapshot, StorageError, DEFAULT_STORAGE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CacheSlot, CacheStore, Category};
