//! Core domain logic for NotePad.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod dictation;
pub mod display;
pub mod logging;
pub mod model;
pub mod notice;
pub mod persistence;
pub mod search;
pub mod storage;
pub mod store;

pub use config::{ConfigError, NotepadConfig};
pub use dictation::{
    DictationError, DictationSession, RecognitionResult, RecognitionSettings, Transcriber,
};
pub use display::{relative_time, relative_time_from_now};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use notice::{NoteAction, Notice, NoticeLevel};
pub use persistence::{
    KeyValueNotePersistence, NotePersistence, PersistenceError, PersistenceResult,
    DEFAULT_STORAGE_KEY,
};
pub use search::filter::filter_notes;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
    UnavailableKeyValueStore,
};
pub use store::{
    open_configured_store, ConfiguredNoteStore, Mutation, NoteError, NoteResult, NoteStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
