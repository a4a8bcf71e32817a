//! In-memory note store kept in sync with a persistence adapter.
//!
//! # Responsibility
//! - Own every `Note` for the session and expose create/update/delete/
//!   list/search use-cases.
//! - Push the full list through `NotePersistence::save` after each mutation.
//!
//! # Invariants
//! - New notes are prepended (most recent first); edits and deletions keep
//!   the relative order of the remaining notes.
//! - Rejected operations (`EmptyContent`, `NotFound`) mutate nothing and do
//!   not call `save`.
//! - Reads never touch storage; the in-memory list is authoritative.
//! - Ids are unique within the store; duplicates in loaded data are dropped,
//!   keeping the first (most recent) occurrence.
//! - A failed save keeps the in-memory change and is reported through
//!   [`Mutation::persist_error`].

use crate::model::note::{validate_content, Note, NoteId};
use crate::persistence::{NotePersistence, PersistenceError, PersistenceResult};
use crate::search::filter::filter_notes;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for note store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Operation referenced an id the store does not hold.
    NotFound(NoteId),
    /// Create/update content is empty or whitespace-only.
    EmptyContent,
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteError {}

pub type NoteResult<T> = Result<T, NoteError>;

/// Outcome of an applied mutation.
///
/// The in-memory change always happened; `persist_error` is set when the
/// follow-up save failed and storage now lags behind memory.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub persist_error: Option<PersistenceError>,
}

impl<T> Mutation<T> {
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Authoritative note list for one session.
pub struct NoteStore<P: NotePersistence> {
    persistence: P,
    notes: Vec<Note>,
    diverged: bool,
}

impl<P: NotePersistence> NoteStore<P> {
    /// Builds the store from whatever `persistence.load()` returns.
    ///
    /// Repeated ids are collapsed to their first occurrence; the next save
    /// rewrites storage without them.
    pub fn open(persistence: P) -> Self {
        let mut notes = persistence.load();
        let loaded = notes.len();
        let mut seen = HashSet::with_capacity(loaded);
        notes.retain(|note| seen.insert(note.id()));
        if notes.len() < loaded {
            warn!(
                "event=store_open module=store status=deduplicated dropped={}",
                loaded - notes.len()
            );
        }
        info!(
            "event=store_open module=store status=ok count={}",
            notes.len()
        );
        Self {
            persistence,
            notes,
            diverged: false,
        }
    }

    /// Creates a note and prepends it to the list.
    pub fn create(&mut self, content: impl Into<String>) -> NoteResult<Mutation<Note>> {
        let content = content.into();
        if validate_content(&content).is_err() {
            info!("event=note_create module=store status=rejected reason=empty_content");
            return Err(NoteError::EmptyContent);
        }

        let note = Note::new(content);
        self.notes.insert(0, note.clone());
        let persist_error = self.persist("note_create", note.id());
        Ok(Mutation {
            value: note,
            persist_error,
        })
    }

    /// Replaces the content of one note, keeping id, timestamp and position.
    pub fn update(&mut self, id: NoteId, content: impl Into<String>) -> NoteResult<Mutation<Note>> {
        let Some(index) = self.position(id) else {
            info!("event=note_update module=store status=rejected reason=not_found note_id={id}");
            return Err(NoteError::NotFound(id));
        };

        let content = content.into();
        if validate_content(&content).is_err() {
            info!(
                "event=note_update module=store status=rejected reason=empty_content note_id={id}"
            );
            return Err(NoteError::EmptyContent);
        }

        self.notes[index].replace_content(content);
        let updated = self.notes[index].clone();
        let persist_error = self.persist("note_update", id);
        Ok(Mutation {
            value: updated,
            persist_error,
        })
    }

    /// Removes one note and returns it.
    pub fn delete(&mut self, id: NoteId) -> NoteResult<Mutation<Note>> {
        let Some(index) = self.position(id) else {
            info!("event=note_delete module=store status=rejected reason=not_found note_id={id}");
            return Err(NoteError::NotFound(id));
        };

        let removed = self.notes.remove(index);
        let persist_error = self.persist("note_delete", id);
        Ok(Mutation {
            value: removed,
            persist_error,
        })
    }

    /// Current notes, most recent first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Case-insensitive substring search; `""` returns the whole list.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        filter_notes(&self.notes, query)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the last save failed and nothing has been saved since.
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    /// Re-pushes the full list through the adapter.
    pub fn sync(&mut self) -> PersistenceResult<()> {
        let result = self.persistence.save(&self.notes);
        self.diverged = result.is_err();
        match &result {
            Ok(()) => info!(
                "event=store_sync module=store status=ok count={}",
                self.notes.len()
            ),
            Err(err) => warn!("event=store_sync module=store status=error error={err}"),
        }
        result
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id() == id)
    }

    fn persist(&mut self, event: &str, id: NoteId) -> Option<PersistenceError> {
        match self.persistence.save(&self.notes) {
            Ok(()) => {
                self.diverged = false;
                info!(
                    "event={event} module=store status=ok note_id={id} count={}",
                    self.notes.len()
                );
                None
            }
            Err(err) => {
                self.diverged = true;
                warn!("event={event} module=store status=diverged note_id={id} error={err}");
                Some(err)
            }
        }
    }
}
