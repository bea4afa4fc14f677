//! Dnevnik Core Library
//!
//! This crate provides the core functionality for Dnevnik, a guided
//! self-reflection journal: a five-step flow (situation → thoughts →
//! body sensations → consequences → life without the problem) records a
//! structured entry; entries are listed, searched, edited, and deleted.
//!
//! # Architecture
//!
//! The whole entry collection persists as one JSON value under a single
//! key in a key-value backend, chosen once at startup: a host-provided
//! store when available, a local file store otherwise.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let backend = Backend::select(None, &config);
//! let repository = EntryRepository::open(EntryStore::new(backend));
//! let mut session = Session::new(repository);
//!
//! session.update_field(DraftField::Situation("...".into()));
//! let entry = session.commit_new()?;
//! ```
//!
//! # Modules
//!
//! - `session`: draft lifecycle and commit paths (main entry point)
//! - `repository`: CRUD over the persisted entry list
//! - `models`: data structures for entries and drafts
//! - `metadata`: title/emoji/tag heuristics run at save time
//! - `query`: search, date-bucketed grouping, tag counts
//! - `storage`: key-value backends and the entry store adapter
//! - `config`: application configuration

pub mod config;
pub mod metadata;
pub mod models;
pub mod query;
pub mod repository;
pub mod session;
pub mod storage;

pub use config::Config;
pub use models::{BodyZone, Draft, DraftField, Entry, EntryMeta};
pub use repository::EntryRepository;
pub use session::{Session, SessionError};
pub use storage::{
    Backend, EntryStore, KeyValueStore, LocalStore, MemoryStore, StorageError, ENTRIES_KEY,
};
