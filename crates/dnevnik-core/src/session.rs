//! Draft session
//!
//! Holds the in-progress entry across the wizard steps, the edit
//! marker, and the repository handle. Constructed once and passed to
//! each wizard step and the list view; there is no ambient singleton.
//!
//! Commit semantics: the draft survives a failed write so the user can
//! retry without re-entering anything; it is only reset after a
//! successful create or update, or an explicit cancel.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::metadata;
use crate::models::{Draft, DraftField, Entry};
use crate::repository::EntryRepository;
use crate::storage::StorageError;

/// Errors surfaced by commit operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The wizard requires situation text before saving
    #[error("Situation text is required before saving")]
    EmptySituation,

    /// `commit_update` was called with no entry being edited
    #[error("No entry is being edited")]
    NoEntryBeingEdited,

    /// The underlying write failed; the draft is kept for retry
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The journaling session: entry list, current draft, edit marker
pub struct Session {
    repository: EntryRepository,
    draft: Draft,
    editing: Option<String>,
}

impl Session {
    pub fn new(repository: EntryRepository) -> Self {
        Self {
            repository,
            draft: Draft::default(),
            editing: None,
        }
    }

    /// The persisted entry list, most-recent-first
    pub fn entries(&self) -> &[Entry] {
        self.repository.list()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.repository.get(id)
    }

    /// Re-read the entry list from storage
    pub fn reload(&mut self) {
        self.repository.reload();
    }

    /// The current draft content
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The id of the entry being edited, if any
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Apply one field update to the draft; always succeeds
    pub fn update_field(&mut self, field: DraftField) {
        self.draft.apply(field);
    }

    /// Copy an entry's content into the draft and mark it as edited
    ///
    /// Silent no-op when the id is unknown; returns whether the entry
    /// was found.
    pub fn load_for_editing(&mut self, id: &str) -> bool {
        match self.repository.get(id) {
            Some(entry) => {
                self.draft = Draft::from_entry(entry);
                self.editing = Some(id.to_string());
                true
            }
            None => false,
        }
    }

    /// Save the draft as a new entry
    ///
    /// Requires non-empty situation text. On success the draft resets;
    /// on failure it is kept so the user can retry.
    pub fn commit_new(&mut self) -> Result<Entry, SessionError> {
        if self.draft.situation.trim().is_empty() {
            return Err(SessionError::EmptySituation);
        }

        let meta = metadata::derive(&self.draft);
        let entry = self.repository.create(self.draft.clone(), meta)?;

        self.draft = Draft::default();
        Ok(entry)
    }

    /// Save the draft over the entry being edited
    ///
    /// Errors when no edit marker is set. `Ok(None)` means the entry
    /// disappeared from the list ("nothing to update"); the draft and
    /// marker stay intact in that case and on write failure.
    pub fn commit_update(
        &mut self,
        timestamp_override: Option<DateTime<Utc>>,
    ) -> Result<Option<Entry>, SessionError> {
        let id = self
            .editing
            .clone()
            .ok_or(SessionError::NoEntryBeingEdited)?;

        let meta = metadata::derive(&self.draft);
        match self
            .repository
            .update(&id, self.draft.clone(), meta, timestamp_override)?
        {
            Some(entry) => {
                self.draft = Draft::default();
                self.editing = None;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Delete an entry; a no-op when the id is unknown
    pub fn delete(&mut self, id: &str) -> Result<(), StorageError> {
        self.repository.delete(id)
    }

    /// Discard the draft and clear the edit marker
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyZone;
    use crate::storage::backend::FailingStore;
    use crate::storage::{Backend, EntryStore, MemoryStore};

    fn memory_session() -> Session {
        let store = EntryStore::new(Backend::Host(Box::new(MemoryStore::new())));
        Session::new(EntryRepository::open(store))
    }

    fn failing_session() -> Session {
        let store = EntryStore::new(Backend::Host(Box::new(FailingStore)));
        Session::new(EntryRepository::open(store))
    }

    fn fill_draft(session: &mut Session) {
        session.update_field(DraftField::Situation("Ссора с другом".to_string()));
        session.update_field(DraftField::Thoughts("Я виноват".to_string()));
        session.update_field(DraftField::BodyFeelings("Тяжесть".to_string()));
        session.update_field(DraftField::BodyZones(vec![BodyZone::Chest]));
        session.update_field(DraftField::Consequences("Грусть весь вечер".to_string()));
        session.update_field(DraftField::WithoutProblem("Пошли бы гулять".to_string()));
    }

    #[test]
    fn test_commit_new_creates_and_resets() {
        let mut session = memory_session();
        fill_draft(&mut session);

        let entry = session.commit_new().unwrap();
        assert_eq!(entry.situation, "Ссора с другом");
        assert_eq!(entry.title, "Ссора с другом");
        assert_eq!(entry.emoji, "😢");
        // "другом" does not contain the stem "друз", so only Грусть matches
        assert_eq!(entry.tags, vec!["Грусть"]);

        assert!(session.draft().is_empty());
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_commit_new_requires_situation() {
        let mut session = memory_session();
        session.update_field(DraftField::Thoughts("Мысли без ситуации".to_string()));

        let err = session.commit_new().unwrap_err();
        assert!(matches!(err, SessionError::EmptySituation));

        // Whitespace-only counts as empty
        session.update_field(DraftField::Situation("   ".to_string()));
        assert!(matches!(
            session.commit_new().unwrap_err(),
            SessionError::EmptySituation
        ));
    }

    #[test]
    fn test_commit_new_failure_keeps_draft() {
        let mut session = failing_session();
        fill_draft(&mut session);
        let draft_before = session.draft().clone();

        let err = session.commit_new().unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));

        assert_eq!(session.draft(), &draft_before);
        assert!(session.editing_id().is_none());
    }

    #[test]
    fn test_load_for_editing_and_update() {
        let mut session = memory_session();
        fill_draft(&mut session);
        let entry = session.commit_new().unwrap();

        assert!(session.load_for_editing(&entry.id));
        assert_eq!(session.editing_id(), Some(entry.id.as_str()));
        assert_eq!(session.draft().situation, "Ссора с другом");

        session.update_field(DraftField::Situation("Помирились".to_string()));
        let updated = session.commit_update(None).unwrap().unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.situation, "Помирились");
        assert_eq!(updated.created_at, entry.created_at);

        // Session returned to empty state
        assert!(session.draft().is_empty());
        assert!(session.editing_id().is_none());
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_load_for_editing_unknown_id_is_noop() {
        let mut session = memory_session();
        fill_draft(&mut session);
        let draft_before = session.draft().clone();

        assert!(!session.load_for_editing("missing-id"));
        assert!(session.editing_id().is_none());
        assert_eq!(session.draft(), &draft_before);
    }

    #[test]
    fn test_commit_update_without_marker_errors() {
        let mut session = memory_session();
        fill_draft(&mut session);

        let err = session.commit_update(None).unwrap_err();
        assert!(matches!(err, SessionError::NoEntryBeingEdited));
    }

    #[test]
    fn test_commit_update_vanished_entry_keeps_draft() {
        let mut session = memory_session();
        fill_draft(&mut session);
        let entry = session.commit_new().unwrap();

        session.load_for_editing(&entry.id);
        session.delete(&entry.id).unwrap();

        let result = session.commit_update(None).unwrap();
        assert!(result.is_none());

        // Draft and marker intact; the caller decides what to do next
        assert!(!session.draft().is_empty());
        assert_eq!(session.editing_id(), Some(entry.id.as_str()));
    }

    #[test]
    fn test_commit_update_with_timestamp_override() {
        let mut session = memory_session();
        fill_draft(&mut session);
        let entry = session.commit_new().unwrap();

        session.load_for_editing(&entry.id);
        let override_ts = "2025-02-10T08:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let updated = session.commit_update(Some(override_ts)).unwrap().unwrap();

        assert_eq!(updated.updated_at, override_ts);
    }

    #[test]
    fn test_reset_clears_draft_and_marker() {
        let mut session = memory_session();
        fill_draft(&mut session);
        let entry = session.commit_new().unwrap();
        session.load_for_editing(&entry.id);

        session.reset();
        assert!(session.draft().is_empty());
        assert!(session.editing_id().is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut session = memory_session();
        fill_draft(&mut session);
        session.commit_new().unwrap();

        session.delete("missing-id").unwrap();
        assert_eq!(session.entries().len(), 1);
    }
}
