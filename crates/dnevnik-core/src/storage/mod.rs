//! Entry persistence
//!
//! Two layers: key-value backends ([`backend`]) holding single string
//! values, and the entry store adapter ([`adapter`]) serializing the
//! whole entry collection under one key.

pub mod adapter;
pub mod backend;
pub mod error;

pub use adapter::{EntryStore, ENTRIES_KEY};
pub use backend::{Backend, KeyValueStore, LocalStore, MemoryStore};
pub use error::{StorageError, StorageResult};
