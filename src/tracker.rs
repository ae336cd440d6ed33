use crate::error::StoreError;
use crate::models::config::TrackerConfig;
use crate::store::{SqliteStore, Store};
use std::sync::{Mutex, MutexGuard};

/// The engine handle: an injected store, the configured catalogs, and a
/// single-writer guard.
///
/// The store holds whole collections per key and every mutation is a
/// full read-modify-write, so concurrent writers would silently drop
/// each other's updates. All mutating commands therefore serialize
/// through `write_lock`; reads go straight to the store.
pub struct Tracker {
    store: Box<dyn Store>,
    config: TrackerConfig,
    write_guard: Mutex<()>,
}

impl Tracker {
    pub fn new(store: Box<dyn Store>, config: TrackerConfig) -> Self {
        Tracker {
            store,
            config,
            write_guard: Mutex::new(()),
        }
    }

    /// Sqlite-backed tracker under `<workspace>/.sprintlens/`,
    /// with the default catalogs.
    pub fn open(workspace_path: &str) -> Result<Self, StoreError> {
        let store = SqliteStore::open(workspace_path)?;
        Ok(Tracker::new(Box::new(store), TrackerConfig::default()))
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub(crate) fn write_lock(&self) -> MutexGuard<'_, ()> {
        // Poisoning only happens if a writer panicked mid-operation;
        // the stored collections are still the last committed state.
        self.write_guard.lock().unwrap_or_else(|e| e.into_inner())
    }
}
