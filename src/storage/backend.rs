//! Storage backend abstraction.
//!
//! This module defines the [`StorageBackend`] trait that abstracts over durable
//! key-value stores. Persisted cells only ever see this trait, so browser-style
//! local storage, a JSON file or an in-memory map are interchangeable.
//!
//! # Design Philosophy
//!
//! The trait mirrors the minimal local-storage surface: opaque string keys and
//! caller-serialized string values. Encoding is the caller's concern.

use crate::domain::error::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Abstraction over durable key-value storage.
///
/// # Implementations
///
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local map
/// - [`JsonFileStorage`](crate::storage::JsonFileStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```
/// use hooklab::storage::{MemoryStorage, StorageBackend};
///
/// let mut storage = MemoryStorage::new();
/// storage.set_item("username", "\"ada\"".to_string())?;
/// assert_eq!(storage.get_item("username")?, Some("\"ada\"".to_string()));
/// # Ok::<(), hooklab::HookError>(())
/// ```
pub trait StorageBackend {
    /// Returns the stored text for `key`, or `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, fully replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn set_item(&mut self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion cannot be made durable.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// A backend shared by every cell created against it.
pub type SharedStorage = Rc<RefCell<dyn StorageBackend>>;

/// Wraps a backend so it can be shared between persisted cells.
///
/// # Examples
///
/// ```
/// use hooklab::storage::{share, MemoryStorage};
///
/// let storage = share(MemoryStorage::new());
/// let same_backend = storage.clone();
/// # drop(same_backend);
/// ```
pub fn share<B: StorageBackend + 'static>(backend: B) -> SharedStorage {
    Rc::new(RefCell::new(backend))
}
