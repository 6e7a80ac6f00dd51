//! hooklab: UI-style state primitives for plain Rust programs.
//!
//! hooklab provides the state-management building blocks popularised by
//! component frameworks as ordinary, single-threaded Rust values:
//! - Debounced values that settle after a quiet period
//! - State cells persisted to a durable key-value store
//! - Reducers with a dispatching store, plus a to-do list reducer
//! - Named event targets with swappable listeners
//! - Boolean toggles

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Entry point (lib.rs)                               │  ← Config, initialize
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Hooks Layer (hooks/)                               │  ← Caller-facing API
//! │  - Debounced, PersistedCell                         │
//! │  - Store/Reducer, EventTarget, Toggle               │
//! │  - HookContext factory                              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Scheduler     │   │ Storage Layer │   │ Domain        │
//! │ (scheduler/)  │   │ (storage/)    │   │ (domain/)     │
//! │ - Virtual     │   │ - Backend API │   │ - Errors      │
//! │ - Event loop  │   │ - JSON file   │   │ - To-do model │
//! │ - Timer queue │   │ - Memory      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Observability                     │
//! │  - Data directory, tilde expansion                  │
//! │  - tracing subscriber + rotating log file           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`hooks`]: The state primitives and their configured factory
//! - [`scheduler`]: Host scheduler trait with virtual and wall-clock loops
//! - [`storage`]: Durable key-value backends
//! - [`domain`]: Error types and the to-do list model
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Structured logging to a rotating file
//!
//! # Configuration
//!
//! ```toml
//! # hooklab.toml
//! storage_path = "~/.local/share/hooklab/storage.json"
//! debounce_ms = 300
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use hooklab::scheduler::ManualScheduler;
//! use hooklab::{initialize, Config};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let hooks = initialize(&Config::default(), scheduler.clone())?;
//!
//! let mut search = hooks.debounced(String::new());
//! search.update("rust".to_string());
//! scheduler.advance(Duration::from_millis(500));
//! assert_eq!(search.read(), "rust");
//!
//! let mut name = hooks.persisted("username", String::new())?;
//! name.set("ada".to_string())?;
//! # Ok::<(), hooklab::HookError>(())
//! ```
//!
//! # Execution Model
//!
//! Everything runs on one thread. Timers fire only when the scheduler owner
//! turns the loop, and storage calls complete synchronously. Handles are owned
//! by a single caller, so no locking is involved.

pub mod domain;
pub mod hooks;
pub mod infrastructure;
pub mod observability;
pub mod scheduler;
pub mod storage;

pub use domain::{HookError, Result};
pub use hooks::{Debounced, EventTarget, HookContext, PersistedCell, Reducer, Store, Toggle};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Runtime configuration.
///
/// Values come from a string map ([`Config::from_map`]) or a TOML document
/// ([`Config::from_toml_str`], [`Config::from_file`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file used for persisted cells.
    ///
    /// A leading `~` is expanded. When unset, cells live in memory only.
    pub storage_path: Option<PathBuf>,

    /// Default debounce window for [`HookContext::debounced`]. Default: 500
    pub debounce_ms: u64,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`.
    ///
    /// Tracing is disabled when unset.
    pub trace_level: Option<String>,

    /// Log file path. Defaults to `hooklab.log` in the data directory.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// # Parsing Rules
    ///
    /// - `storage_path`, `trace_file`: tilde-expanded paths, blank means unset
    /// - `debounce_ms`: `u64` (falls back to 500 on parse error)
    /// - `trace_level`: blank means unset
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hooklab::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let debounce_ms = non_blank("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            storage_path: non_blank("storage_path").map(infrastructure::expand_tilde),
            debounce_ms,
            trace_level: non_blank("trace_level").map(String::from),
            trace_file: non_blank("trace_file").map(infrastructure::expand_tilde),
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Config`] on malformed TOML, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)
            .map_err(|e| HookError::Config(format!("failed to parse config: {e}")))?;

        config.storage_path = config.storage_path.as_deref().map(expand_path);
        config.trace_file = config.trace_file.as_deref().map(expand_path);
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Io`] if the file cannot be read and
    /// [`HookError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// The default debounce window as a `Duration`.
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    path.to_str()
        .map_or_else(|| path.to_path_buf(), infrastructure::expand_tilde)
}

/// Builds a [`HookContext`] from configuration.
///
/// - Installs the tracing subscriber if `trace_level` is set
/// - Opens the JSON storage file if `storage_path` is set, otherwise uses an
///   in-memory backend
/// - Applies the default debounce window
///
/// # Errors
///
/// Returns an error if the storage file exists but cannot be read, or if its
/// directory cannot be created. A file that does not parse is moved aside and
/// storage starts empty.
///
/// # Example
///
/// ```rust
/// use hooklab::scheduler::EventLoop;
/// use hooklab::{initialize, Config};
/// use std::rc::Rc;
///
/// let hooks = initialize(&Config::default(), Rc::new(EventLoop::new()))?;
/// assert_eq!(hooks.debounce_delay().as_millis(), 500);
/// # Ok::<(), hooklab::HookError>(())
/// ```
pub fn initialize(config: &Config, scheduler: scheduler::SharedScheduler) -> Result<HookContext> {
    observability::init_tracing(config);
    tracing::debug!(config = ?config, "initializing hooklab");

    let storage = match &config.storage_path {
        Some(path) => storage::share(storage::JsonFileStorage::open(path.clone())?),
        None => {
            tracing::debug!("no storage path configured, using in-memory storage");
            storage::share(storage::MemoryStorage::new())
        }
    };

    Ok(HookContext::new(scheduler, storage, config.debounce_delay()))
}
