//! # Key-Value Storage
//!
//! Persistent string storage for the session slices (theme, favorites,
//! recently viewed, cart, AR session log). Every value is a JSON document.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  KeyValueStore (trait)                                                 │
//! │  ├── MemoryStorage     BTreeMap behind a Mutex, lost on exit           │
//! │  └── JsonFileStorage   one JSON object on disk:                        │
//! │                          { "restaurant-cart": "[...]", ... }           │
//! │                        every write rewrites <file>.tmp then renames    │
//! │                        it over <file>                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerant Reads
//! [`load_or_default`] never fails: a missing key yields the default, an
//! unparsable value is removed and also yields the default. Callers that
//! need the distinction use [`try_load`].

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// String-keyed persistent storage.
///
/// Implementations use interior mutability so one handle can be shared by
/// the store and whoever inspects it.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Typed Reads
// =============================================================================

/// Reads and decodes `key`.
///
/// ## Returns
/// * `Ok(Some(T))` - value present and valid
/// * `Ok(None)` - key absent
/// * `Err(Serialization)` - value present but not a valid `T`
pub fn try_load<T: DeserializeOwned>(
    storage: &(impl KeyValueStore + ?Sized),
    key: &str,
) -> StorageResult<Option<T>> {
    match storage.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e)),
    }
}

/// Like [`try_load`], but any failure yields `None`.
///
/// An unparsable value is removed so the next start is clean.
pub fn load_optional<T: DeserializeOwned>(
    storage: &(impl KeyValueStore + ?Sized),
    key: &str,
) -> Option<T> {
    match try_load(storage, key) {
        Ok(value) => value,
        Err(e @ StorageError::Serialization { .. }) => {
            warn!(key = %key, error = %e, "Discarding malformed stored value");
            if let Err(remove_err) = storage.remove(key) {
                warn!(key = %key, error = %remove_err, "Failed to remove malformed value");
            }
            None
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read stored value");
            None
        }
    }
}

/// Like [`load_optional`], substituting `T::default()`.
pub fn load_or_default<T: DeserializeOwned + Default>(
    storage: &(impl KeyValueStore + ?Sized),
    key: &str,
) -> T {
    load_optional(storage, key).unwrap_or_default()
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

// =============================================================================
// JSON File Storage
// =============================================================================

/// Storage persisted as a single JSON object on disk.
///
/// The whole document is cached in memory; every write rewrites the file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStorage {
    /// Opens (or prepares to create) the document at `path`.
    ///
    /// ## Errors
    /// - `Io` when the file exists but cannot be read
    /// - `Corrupt` when the file is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
            }
        } else {
            debug!(path = %path.display(), "Storage file not found, starting empty");
            BTreeMap::new()
        };

        Ok(JsonFileStorage {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Like [`JsonFileStorage::open`], but a corrupt document is discarded
    /// and the session starts empty. I/O errors still fail.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        match Self::open(&path) {
            Err(StorageError::Corrupt { reason, .. }) => {
                warn!(path = %path.display(), reason = %reason, "Resetting corrupt storage file");
                Ok(JsonFileStorage {
                    path,
                    entries: Mutex::new(BTreeMap::new()),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basics() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "\"v\"").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("\"v\""));

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_load_or_default_missing_key() {
        let storage = MemoryStorage::new();
        let favorites: Vec<String> = load_or_default(&storage, "restaurant-favorites");
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_malformed_value_is_removed() {
        let storage = MemoryStorage::new();
        storage.set("restaurant-favorites", "{not json").unwrap();

        assert!(matches!(
            try_load::<Vec<String>>(&storage, "restaurant-favorites"),
            Err(StorageError::Serialization { .. })
        ));

        let favorites: Vec<String> = load_or_default(&storage, "restaurant-favorites");
        assert!(favorites.is_empty());
        assert_eq!(storage.get("restaurant-favorites").unwrap(), None);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let storage = MemoryStorage::new();
        storage.set("restaurant-recently-viewed", "42").unwrap();

        let recent: Vec<String> = load_or_default(&storage, "restaurant-recently-viewed");
        assert!(recent.is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_json_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("restaurant-theme", "\"dark\"").unwrap();
        storage.set("restaurant-favorites", "[\"1\"]").unwrap();
        storage.remove("restaurant-favorites").unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("restaurant-theme").unwrap().as_deref(),
            Some("\"dark\"")
        );
        assert_eq!(reopened.get("restaurant-favorites").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(StorageError::Corrupt { .. })
        ));

        let reset = JsonFileStorage::open_or_reset(&path).unwrap();
        assert_eq!(reset.get("restaurant-theme").unwrap(), None);
        reset.set("restaurant-theme", "\"modern\"").unwrap();
        assert!(JsonFileStorage::open(&path).is_ok());
    }
}
