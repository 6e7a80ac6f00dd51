//! JSON file-based storage backend.
//!
//! This module provides a human-readable, durable key-value store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) so a crash
//! never leaves a half-written file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads the entire file into memory once
//! - **Write**: O(n) - serializes and writes the entire item map
//! - **Best for**: small preference-style payloads, infrequent writes

use crate::domain::error::{HookError, Result};
use crate::storage::backend::StorageBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Items are kept in a
/// `BTreeMap` so the file diff stays stable between writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Serialized values by key.
    #[serde(default)]
    items: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            items: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole item map is kept in memory and persisted after every mutation.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "items": {
///     "app-theme": "\"dark\"",
///     "username": "\"ada\""
///   }
/// }
/// ```
pub struct JsonFileStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on open.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonFileStorage {
    /// Creates or opens a JSON storage file.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty without
    /// touching the disk. Parent directories are created automatically.
    ///
    /// A file that does not parse or carries an unsupported version is moved
    /// aside to `<name>.corrupt-<timestamp>` and storage starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hooklab::storage::JsonFileStorage;
    ///
    /// let storage = JsonFileStorage::open("/tmp/hooklab/storage.json")?;
    /// # Ok::<(), hooklab::HookError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON storage");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(data) => data,
                Err(HookError::Storage(reason)) => {
                    Self::quarantine(&file_path, &reason)?;
                    StorageData::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(item_count = data.items.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.items.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.items.is_empty()
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| HookError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version != FORMAT_VERSION {
            return Err(HookError::Storage(format!(
                "unsupported storage version {} in {}",
                data.version,
                path.display()
            )));
        }

        tracing::debug!(version = data.version, items = data.items.len(), "loaded storage data");
        Ok(data)
    }

    /// Moves an unusable file out of the way so the next save does not
    /// overwrite it.
    fn quarantine(path: &Path, reason: &str) -> Result<PathBuf> {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{timestamp}"));
        let aside = path.with_file_name(name);

        tracing::warn!(
            path = ?path,
            moved_to = ?aside,
            reason = %reason,
            "storage file unusable, starting empty"
        );
        std::fs::rename(path, &aside)?;
        Ok(aside)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| HookError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl StorageBackend for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let _span = tracing::debug_span!("json_set_item", key = %key, bytes = value.len()).entered();

        if self.data.items.get(key) == Some(&value) && !self.dirty {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.items.insert(key.to_string(), value);
        self.dirty = true;
        self.save_to_file()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_item", key = %key).entered();

        if self.data.items.remove(key).is_none() {
            return Ok(());
        }

        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonFileStorage {
    /// Retries a save that failed earlier so the last value is not lost.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

impl std::fmt::Debug for JsonFileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStorage")
            .field("file_path", &self.file_path)
            .field("items", &self.data.items.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let mut storage = JsonFileStorage::open(&path).unwrap();
            storage.set_item("username", "\"ada\"".to_string()).unwrap();
            storage.set_item("count", "3".to_string()).unwrap();
        }

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get_item("username").unwrap().as_deref(), Some("\"ada\""));
        assert_eq!(storage.get_item("count").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn missing_file_is_not_created_until_first_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = JsonFileStorage::open(&path).unwrap();
        assert!(!path.exists());

        storage.set_item("k", "1".to_string()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn remove_item_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut storage = JsonFileStorage::open(&path).unwrap();
        storage.set_item("k", "1".to_string()).unwrap();
        storage.remove_item("k").unwrap();
        storage.remove_item("never-there").unwrap();
        drop(storage);

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.is_empty());
    }

    fn corrupt_copies(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.to_string_lossy().contains("storage.json.corrupt-"))
            .collect()
    }

    #[test]
    fn corrupt_file_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.is_empty());
        assert!(!path.exists());

        let aside = corrupt_copies(dir.path());
        assert_eq!(aside.len(), 1);
        assert_eq!(std::fs::read_to_string(&aside[0]).unwrap(), "{ not json");
    }

    #[test]
    fn unknown_version_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"version": 7, "items": {"k": "1"}}"#).unwrap();

        let mut storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        assert_eq!(corrupt_copies(dir.path()).len(), 1);

        storage.set_item("k", "2".to_string()).unwrap();
        drop(storage);
        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn dirty_data_is_saved_on_drop() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        let path = blocked.join("storage.json");

        let mut storage = JsonFileStorage::open(&path).unwrap();
        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();
        assert!(storage.set_item("k", "1".to_string()).is_err());
        assert!(!path.exists());

        std::fs::remove_dir(path.with_extension("tmp")).unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("1"));
    }
}
