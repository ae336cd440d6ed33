use super::Store;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(key).cloned())
    }

    fn save_raw(&self, key: &str, json: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.insert(key.to_string(), json.to_string());
        Ok(())
    }
}
