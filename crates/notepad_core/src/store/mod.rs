//! Note store use-cases.
//!
//! # Responsibility
//! - Orchestrate in-memory note state and persistence sync.
//! - Assemble a ready store from runtime configuration.
//!
//! # Invariants
//! - Opening a configured store never fails: an unopenable database yields
//!   an empty store whose saves report `PersistenceUnavailable`.

use crate::config::NotepadConfig;
use crate::persistence::KeyValueNotePersistence;
use crate::storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, UnavailableKeyValueStore,
};
use log::warn;

pub mod note_store;

pub use note_store::{Mutation, NoteError, NoteResult, NoteStore};

/// Store type assembled from [`NotepadConfig`].
pub type ConfiguredNoteStore = NoteStore<KeyValueNotePersistence<Box<dyn KeyValueStore + Send>>>;

/// Opens the store described by `config`.
///
/// - `db_path = None` keeps notes in memory.
/// - A database that fails to open degrades to an unavailable backend.
pub fn open_configured_store(config: &NotepadConfig) -> ConfiguredNoteStore {
    let backend: Box<dyn KeyValueStore + Send> = match config.db_path.as_ref() {
        None => Box::new(MemoryKeyValueStore::new()),
        Some(path) => match SqliteKeyValueStore::open(path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(
                    "event=store_open module=store status=degraded path={} error={}",
                    path.display(),
                    err
                );
                Box::new(UnavailableKeyValueStore::new(err.to_string()))
            }
        },
    };

    NoteStore::open(KeyValueNotePersistence::with_key(
        backend,
        config.storage_key.clone(),
    ))
}
