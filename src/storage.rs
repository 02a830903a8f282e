//! The single persisted value: the last opened image source.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::InitialSourceConfig;
use crate::error::StorageError;

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Store kept in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Pick the first image to show.
///
/// The query parameter wins, then the remembered source, then the default.
/// Only empty strings count as absent.
pub fn resolve_initial_source(
    query_value: Option<&str>,
    store: &dyn KeyValueStore,
    config: &InitialSourceConfig,
) -> String {
    let non_empty = |s: &String| !s.is_empty();
    query_value
        .map(str::to_string)
        .filter(non_empty)
        .or_else(|| store.get(&config.storage_key).filter(non_empty))
        .unwrap_or_else(|| config.default_source.clone())
}
