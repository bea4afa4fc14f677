//! Key-value storage backends
//!
//! The entry collection lives under a single key in whichever backend
//! is selected at startup: a host-provided store when one is present
//! and passes its capability probe, otherwise a device-scoped file
//! store. The choice is made once, never re-checked per call.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::config::Config;
use crate::storage::error::{StorageError, StorageResult};

/// A key-value store holding whole collections as single string values
///
/// This is the seam toward host-provided storage: embedders can supply
/// their own implementation, the CLI always ends up on [`LocalStore`].
pub trait KeyValueStore {
    /// Capability probe: whether this store can currently be used
    ///
    /// A host store reports `false` when it is absent or below the
    /// minimum supported host version.
    fn is_available(&self) -> bool {
        true
    }

    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Device-scoped fallback store, one file per key under the data dir
///
/// Writes are atomic: the value goes to a temp file which is then
/// renamed over the target, so the file is never left half-written.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|source| StorageError::ReadError { path, source })?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        atomic_write(&self.path_for(key), value.as_bytes())
    }
}

/// In-memory store
///
/// Stands in for a host-provided store in tests and embedding hosts
/// that manage persistence themselves.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose capability probe fails, for exercising fallback
    pub fn unavailable() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The storage backend selected at startup
pub enum Backend {
    /// Host-provided key-value store
    Host(Box<dyn KeyValueStore>),
    /// Device-scoped file store
    Local(LocalStore),
}

impl Backend {
    /// Probe once and pick a backend
    ///
    /// The host store is preferred when present and available;
    /// otherwise the local file store under the configured data dir.
    pub fn select(host: Option<Box<dyn KeyValueStore>>, config: &Config) -> Self {
        match host {
            Some(store) if store.is_available() => Backend::Host(store),
            Some(_) => {
                debug!("host store unavailable, using local store");
                Backend::Local(LocalStore::new(config.data_dir.clone()))
            }
            None => {
                debug!("no host store, using local store");
                Backend::Local(LocalStore::new(config.data_dir.clone()))
            }
        }
    }
}

impl KeyValueStore for Backend {
    fn is_available(&self) -> bool {
        match self {
            Backend::Host(store) => store.is_available(),
            Backend::Local(_) => true,
        }
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Backend::Host(store) => store.get(key),
            Backend::Local(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Backend::Host(store) => store.set(key, value),
            Backend::Local(store) => store.set(key, value),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path).map_err(|source| StorageError::WriteError {
        path: temp_path.clone(),
        source,
    })?;

    file.write_all(data)
        .map_err(|source| StorageError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

    file.sync_all()
        .map_err(|source| StorageError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// A store that rejects every write, for failure-path tests
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::StoreRejected {
            key: key.to_string(),
            details: "simulated write failure".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path());

        assert!(store.get("journal_entries").unwrap().is_none());

        store.set("journal_entries", "[]").unwrap();
        assert_eq!(
            store.get("journal_entries").unwrap().as_deref(),
            Some("[]")
        );

        // Overwrite replaces the value
        store.set("journal_entries", "[1]").unwrap();
        assert_eq!(
            store.get("journal_entries").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn test_local_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("deeper");
        let store = LocalStore::new(&nested);

        store.set("journal_entries", "{}").unwrap();
        assert!(nested.join("journal_entries.json").exists());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_select_prefers_available_host() {
        let config = Config::default();
        let backend = Backend::select(Some(Box::new(MemoryStore::new())), &config);
        assert!(matches!(backend, Backend::Host(_)));
    }

    #[test]
    fn test_select_falls_back_when_host_unavailable() {
        let config = Config::default();
        let backend = Backend::select(Some(Box::new(MemoryStore::unavailable())), &config);
        assert!(matches!(backend, Backend::Local(_)));
    }

    #[test]
    fn test_select_falls_back_without_host() {
        let config = Config::default();
        let backend = Backend::select(None, &config);
        assert!(matches!(backend, Backend::Local(_)));
    }

    #[test]
    fn test_failing_store_rejects_writes() {
        let store = FailingStore;
        let err = store.set("journal_entries", "[]").unwrap_err();
        assert!(matches!(err, StorageError::StoreRejected { .. }));
    }
}
