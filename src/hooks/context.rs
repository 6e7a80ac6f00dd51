//! Configured factory for scheduler- and storage-backed primitives.

use crate::domain::error::Result;
use crate::hooks::debounce::Debounced;
use crate::hooks::persisted::PersistedCell;
use crate::scheduler::SharedScheduler;
use crate::storage::SharedStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Bundles the scheduler, the storage backend and the default debounce delay.
///
/// Created by [`initialize`](crate::initialize); cheap to clone.
#[derive(Clone)]
pub struct HookContext {
    scheduler: SharedScheduler,
    storage: SharedStorage,
    debounce_delay: Duration,
}

impl HookContext {
    /// Bundles a scheduler, a storage backend and the default debounce window.
    #[must_use]
    pub fn new(scheduler: SharedScheduler, storage: SharedStorage, debounce_delay: Duration) -> Self {
        Self {
            scheduler,
            storage,
            debounce_delay,
        }
    }

    /// A debounced value using the configured default delay.
    #[must_use]
    pub fn debounced<T: Clone + 'static>(&self, initial: T) -> Debounced<T> {
        Debounced::with_delay(initial, self.debounce_delay, self.scheduler.clone())
    }

    /// A debounced value with an explicit delay in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `delay_ms` is negative.
    pub fn debounced_with_delay<T: Clone + 'static>(&self, initial: T, delay_ms: i64) -> Result<Debounced<T>> {
        Debounced::new(initial, delay_ms, self.scheduler.clone())
    }

    /// A persisted cell on the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is empty.
    pub fn persisted<T>(&self, key: impl Into<String>, initial: T) -> Result<PersistedCell<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        PersistedCell::new(key, initial, self.storage.clone())
    }

    /// Scheduler that drives debounce timers.
    #[must_use]
    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    /// Backend shared by every persisted cell from this context.
    #[must_use]
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Delay used by [`debounced`](Self::debounced).
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }
}

impl std::fmt::Debug for HookContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("debounce_delay", &self.debounce_delay)
            .finish_non_exhaustive()
    }
}
