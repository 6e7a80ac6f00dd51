//! State cell mirrored to durable storage.
//!
//! A [`PersistedCell`] behaves like plain local state whose every write is
//! also serialized to a [`StorageBackend`](crate::storage::StorageBackend)
//! under a fixed key. On creation it seeds itself from the backend, falling
//! back to the supplied initial value when the entry is absent, unreadable or
//! malformed.
//!
//! # Failure Model
//!
//! - Reads never fail: backend and decode errors are logged and treated as
//!   "absent".
//! - Writes report backend and encode errors to the caller, but the in-memory
//!   value is updated first and is never rolled back.
//! - Nothing is retried; calling `set` again is the retry.

use crate::domain::error::{HookError, Result};
use crate::storage::SharedStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Value/setter pair backed by durable storage.
///
/// Several cells may share one backend and even one key; they do not observe
/// each other and the last write wins.
///
/// # Example
///
/// ```rust
/// use hooklab::hooks::PersistedCell;
/// use hooklab::storage::{share, MemoryStorage};
///
/// let storage = share(MemoryStorage::new());
///
/// let mut theme = PersistedCell::new("app-theme", "light".to_string(), storage.clone())?;
/// theme.set("dark".to_string())?;
///
/// // A fresh cell against the same backend sees the stored value.
/// let reloaded = PersistedCell::new("app-theme", "light".to_string(), storage)?;
/// assert_eq!(reloaded.get(), "dark");
/// # Ok::<(), hooklab::HookError>(())
/// ```
pub struct PersistedCell<T> {
    key: String,
    value: T,
    storage: SharedStorage,
}

impl<T> PersistedCell<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a cell, seeding it from storage when a valid entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidArgument`] if `key` is empty. Storage
    /// problems never fail construction.
    pub fn new(key: impl Into<String>, initial: T, storage: SharedStorage) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(HookError::InvalidArgument("storage key must not be empty".to_string()));
        }

        let _span = tracing::debug_span!("persisted_cell_new", key = %key).entered();
        let value = read_entry(&storage, &key).unwrap_or(initial);

        Ok(Self { key, value, storage })
    }

    /// Storage key of this cell.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and writes it to storage.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Serialization`] if the value cannot be encoded, or
    /// encodes to text that does not decode back (`NaN`, infinities), and any
    /// backend error from the write. The new value is kept either way.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.value = value;
        self.persist()
    }

    /// Derives the next value from the current one and writes it to storage.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    ///
    /// # Example
    ///
    /// ```rust
    /// use hooklab::hooks::PersistedCell;
    /// use hooklab::storage::{share, MemoryStorage};
    ///
    /// let mut clicks = PersistedCell::new("clicks", 0_u32, share(MemoryStorage::new()))?;
    /// for _ in 0..3 {
    ///     clicks.update(|prev| prev + 1)?;
    /// }
    /// assert_eq!(*clicks.get(), 3);
    /// # Ok::<(), hooklab::HookError>(())
    /// ```
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Result<()> {
        let next = f(&self.value);
        self.set(next)
    }

    /// Re-reads the entry from storage, keeping the current value if the entry
    /// is absent or invalid. Returns `true` if a stored value was loaded.
    pub fn reload(&mut self) -> bool {
        match read_entry(&self.storage, &self.key) {
            Some(value) => {
                self.value = value;
                true
            }
            None => false,
        }
    }

    /// Consumes the cell, returning its value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    fn persist(&self) -> Result<()> {
        let _span = tracing::debug_span!("persisted_cell_write", key = %self.key).entered();

        let raw = serde_json::to_string(&self.value)
            .and_then(|raw| {
                // Non-finite floats encode as `null`, which reads back differently.
                serde_json::from_str::<T>(&raw)?;
                Ok(raw)
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "value does not survive encoding");
                HookError::Serialization(e)
            })?;

        let mut storage = self
            .storage
            .try_borrow_mut()
            .map_err(|_| HookError::Storage("storage backend is busy".to_string()))?;

        storage.set_item(&self.key, raw).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist value, keeping in-memory value");
            e
        })
    }
}

/// Reads and decodes one entry, degrading every failure to `None`.
fn read_entry<T: DeserializeOwned>(storage: &SharedStorage, key: &str) -> Option<T> {
    let raw = match storage.try_borrow() {
        Ok(backend) => backend.get_item(key),
        Err(_) => Err(HookError::Storage("storage backend is busy".to_string())),
    };

    match raw {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!("seeded from storage");
                Some(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "stored value is malformed, using fallback");
                None
            }
        },
        Ok(None) => {
            tracing::debug!("no stored value, using fallback");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "storage read failed, using fallback");
            None
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PersistedCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedCell")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
