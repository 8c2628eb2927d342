use crate::error::StoreError;
use std::collections::HashMap;

mod file_store;

pub use file_store::{FileStore, STORE_DIR_ENV_VAR, default_store_dir};

/// Opaque string-keyed persisted storage. Implementations only have to
/// move strings in and out; the task list store owns serialization.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, or `None` when the key has
    /// never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Purely in-memory backend for tests and embedding. Contents are lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value directly, bypassing any task list logic.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
