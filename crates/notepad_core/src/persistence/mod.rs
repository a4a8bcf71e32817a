//! Persistence adapter between the note store and a string-keyed store.
//!
//! # Responsibility
//! - Own the persisted schema of the note list (see [`codec`]).
//! - Translate the full in-memory list to/from one key-value entry.
//!
//! # Invariants
//! - `save` always writes the entire collection, never deltas.
//! - `load` never fails: missing data is an empty list and unreadable data
//!   is logged and treated as empty.
//!
//! # See also
//! - crate::storage

use crate::model::note::Note;
use crate::storage::{KeyValueStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;

/// Storage key used by the browser widget.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Read or write failure of the persisted note list.
#[derive(Debug)]
pub enum PersistenceError {
    /// Underlying key-value store failed or is unsupported.
    Storage(StorageError),
    /// In-memory list could not be serialized.
    Encode(serde_json::Error),
    /// Stored representation is malformed.
    Decode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "persistence unavailable: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Decode(err) => write!(f, "malformed persisted notes: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Two-method contract the note store relies on.
///
/// Swap implementations to change durability without touching the store.
pub trait NotePersistence {
    /// Returns the persisted notes, or an empty list when none are readable.
    fn load(&self) -> Vec<Note>;
    /// Overwrites the persisted representation with `notes`.
    fn save(&mut self, notes: &[Note]) -> PersistenceResult<()>;
}

impl<P: NotePersistence + ?Sized> NotePersistence for Box<P> {
    fn load(&self) -> Vec<Note> {
        (**self).load()
    }

    fn save(&mut self, notes: &[Note]) -> PersistenceResult<()> {
        (**self).save(notes)
    }
}

/// Persists the note list as JSON under one key of a [`KeyValueStore`].
pub struct KeyValueNotePersistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueNotePersistence<S> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads notes and reports why the data could not be read.
    ///
    /// A missing entry is `Ok(vec![])`.
    pub fn try_load(&self) -> PersistenceResult<Vec<Note>> {
        match self.store.get(&self.key)? {
            Some(raw) => codec::decode_notes(&raw).map_err(PersistenceError::Decode),
            None => Ok(Vec::new()),
        }
    }
}

impl<S: KeyValueStore> NotePersistence for KeyValueNotePersistence<S> {
    fn load(&self) -> Vec<Note> {
        match self.try_load() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=persistence status=ok key={} count={}",
                    self.key,
                    notes.len()
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=persistence status=degraded key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, notes: &[Note]) -> PersistenceResult<()> {
        let raw = codec::encode_notes(notes).map_err(PersistenceError::Encode)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}
