//! Opaque key-value persistence
//!
//! Values are JSON documents stored under string keys. Writes land in memory
//! first and reach durable storage on [`KeyValueStore::flush`].
//!
//! # Example
//!
//! ```rust
//! use vibebeat_storage::{get_value, set_value, KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! set_value(&store, "volume", &70u8).unwrap();
//! assert_eq!(get_value::<u8>(&store, "volume").unwrap(), Some(70));
//! ```

use crate::error::{Result, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// String-keyed store of JSON values
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Persist pending writes
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Read and decode a typed value
pub fn get_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encode and write a typed value
pub fn set_value<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    store.set(key, serde_json::to_value(value)?)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FileState {
    entries: BTreeMap<String, serde_json::Value>,
    dirty: bool,
}

/// Store backed by a single JSON object on disk
///
/// Flushing writes a sibling temp file and renames it over the target, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl JsonFileStore {
    /// Open `path`, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                StorageError::SerializationError(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened session store");

        Ok(Self {
            path,
            state: Mutex::new(FileState {
                entries,
                dirty: false,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(lock(&self.state).entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut state = lock(&self.state);
        if state.entries.get(key) != Some(&value) {
            state.entries.insert(key.to_string(), value);
            state.dirty = true;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = lock(&self.state);
        if state.entries.remove(key).is_some() {
            state.dirty = true;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = lock(&self.state);
        if !state.dirty {
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(&state.entries)?;
        self.write_atomic(&contents)?;
        state.dirty = false;

        debug!(path = %self.path.display(), keys = state.entries.len(), "Flushed session store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.set("k", json!([1, 2])).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!([1, 2])));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn typed_helpers_report_bad_shape() {
        let store = MemoryStore::new();
        store.set("k", json!("not a number")).unwrap();
        assert!(matches!(
            get_value::<u8>(&store, "k"),
            Err(StorageError::SerializationError(_))
        ));
    }

    #[test]
    fn file_store_persists_only_on_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("liked", json!(["a.mp3"])).unwrap();
        assert!(!path.exists());

        store.flush().unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("liked").unwrap(), Some(json!(["a.mp3"])));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("k", json!(1)).unwrap();
        store.flush().unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), vibebeat_core::ErrorKind::Storage);
    }
}
