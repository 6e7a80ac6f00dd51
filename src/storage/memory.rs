//! In-memory storage backend.

use crate::domain::error::Result;
use crate::storage::backend::StorageBackend;
use std::collections::HashMap;

/// Process-local key-value store.
///
/// Nothing survives the process, but a single instance shared across cells
/// behaves exactly like a durable store for the lifetime of the program. This
/// is the default backend when no storage path is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        tracing::trace!(key = %key, bytes = value.len(), "memory set_item");
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() {
        let mut storage = MemoryStorage::new();
        storage.set_item("theme", "\"light\"".to_string()).unwrap();
        storage.set_item("theme", "\"dark\"".to_string()).unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("\"dark\""));
    }

    #[test]
    fn remove_of_absent_key_is_ok() {
        let mut storage = MemoryStorage::new();
        storage.remove_item("missing").unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }
}
