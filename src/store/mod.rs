pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Keys for the three persisted collections.
pub const SPRINTS_KEY: &str = "sprints";
pub const SPRINT_BACKLOG_KEY: &str = "sprintBacklog";
pub const PRODUCT_BACKLOG_KEY: &str = "backlogItems";

/// Key-value persistence contract. Each key holds one full collection
/// serialized as a JSON array; the engine always round-trips whole
/// collections and treats the store as authoritative.
pub trait Store: Send {
    /// The stored JSON for a key, or `None` if never written.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StoreError>;
}

/// Load a whole collection; a missing key is the empty collection.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    match store.load_raw(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Replace a whole collection.
pub fn save_collection<T: Serialize>(
    store: &dyn Store,
    key: &str,
    records: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(records)?;
    store.save_raw(key, &raw)
}
