//! Entry store adapter
//!
//! One stored value, a JSON array of entries, under a single fixed key.
//! Every mutation rewrites the whole collection, so writes are O(total
//! entries); at personal-journal scale that ceiling is acceptable and
//! keeps the backend contract to plain get/set.

use tracing::warn;

use crate::models::Entry;
use crate::storage::backend::{Backend, KeyValueStore};
use crate::storage::error::StorageResult;

/// The single key holding the entire entry collection
pub const ENTRIES_KEY: &str = "journal_entries";

/// Reads and writes the serialized entry list through a backend
pub struct EntryStore {
    backend: Backend,
}

impl EntryStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Load the stored entry list
    ///
    /// A missing value, a failed read, or an unparseable blob all
    /// degrade to an empty list; this never fails toward the caller.
    pub fn load(&self) -> Vec<Entry> {
        let raw = match self.backend.get(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("failed to read entry store, treating as empty: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("stored entries failed to parse, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    /// Persist the full entry list as one value
    pub fn save(&self, entries: &[Entry]) -> StorageResult<()> {
        let data = serde_json::to_string(entries)?;
        self.backend.set(ENTRIES_KEY, &data)
    }
}
