//! Entry repository
//!
//! CRUD over the entry list. Every mutation is one full
//! read-modify-write cycle through the entry store; there is no locking
//! or transaction isolation, so two racing writers resolve to
//! last-write-wins. The in-memory cache is only replaced after a
//! successful write, never optimistically.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Draft, Entry, EntryMeta};
use crate::storage::{EntryStore, StorageResult};

/// Length of the random id suffix
const ID_SUFFIX_LEN: usize = 7;

/// Repository over the persisted entry list
///
/// Owns the in-memory cache that is the caller's single source of
/// truth. Ordering is insertion order, most-recent-first.
pub struct EntryRepository {
    store: EntryStore,
    entries: Vec<Entry>,
}

impl EntryRepository {
    /// Open the repository, loading the current list from the store
    pub fn open(store: EntryStore) -> Self {
        let entries = store.load();
        Self { store, entries }
    }

    /// The cached entry list, most-recent-first
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    /// Re-read the list from the store
    pub fn reload(&mut self) {
        self.entries = self.store.load();
    }

    /// Look up a cached entry by id
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Create a new entry from draft content and derived metadata
    ///
    /// Assigns a fresh id, sets both timestamps to now, prepends to the
    /// list, and persists. On write failure the cache is unchanged and
    /// the error propagates.
    pub fn create(&mut self, draft: Draft, meta: EntryMeta) -> StorageResult<Entry> {
        let now = Utc::now();
        let entry = Entry::new(generate_id(now), draft, meta, now);

        let mut entries = self.store.load();
        entries.insert(0, entry.clone());
        self.store.save(&entries)?;

        self.entries = entries;
        Ok(entry)
    }

    /// Update an existing entry in place
    ///
    /// An unknown id is "nothing to update": returns `Ok(None)` without
    /// touching the store. `updated_at` is set to now unless the caller
    /// supplies an explicit override (the user edited the recorded
    /// date/time).
    pub fn update(
        &mut self,
        id: &str,
        draft: Draft,
        meta: EntryMeta,
        timestamp_override: Option<DateTime<Utc>>,
    ) -> StorageResult<Option<Entry>> {
        let mut entries = self.store.load();

        let Some(existing) = entries.iter_mut().find(|entry| entry.id == id) else {
            return Ok(None);
        };

        existing.apply_draft(draft, meta, timestamp_override.unwrap_or_else(Utc::now));
        let updated = existing.clone();

        self.store.save(&entries)?;

        self.entries = entries;
        Ok(Some(updated))
    }

    /// Delete the entry with the given id
    ///
    /// A no-op (not an error) when the id is unknown.
    pub fn delete(&mut self, id: &str) -> StorageResult<()> {
        let mut entries = self.store.load();
        entries.retain(|entry| entry.id != id);
        self.store.save(&entries)?;

        self.entries = entries;
        Ok(())
    }
}

/// Generate an entry id: unix-millis plus a short random suffix
///
/// Uniqueness is only required within a device session; the random
/// suffix guards against two creates landing on the same millisecond.
fn generate_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &random[..ID_SUFFIX_LEN])
}
