//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note create/update/delete/list/search to Dart via FRB.
//! - Translate store outcomes into UI notices and flat list items.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One note store lives per process; calls are serialized by its mutex.
//! - Note ids cross the boundary as UTF-8 UUID strings.

use chrono::Utc;
use log::info;
use notepad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    open_configured_store, ping as ping_inner, relative_time, ConfiguredNoteStore, Note,
    NoteAction, NoteId, NotepadConfig, Notice, NoticeLevel,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const SESSION_DB_FILE_NAME: &str = "notepad_session.sqlite3";
static SESSION_STORE: OnceLock<Mutex<ConfiguredNoteStore>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the session note store at `db_path`.
///
/// # FFI contract
/// - Must run before any other `notes_*` call to take effect; otherwise the
///   store is opened lazily from `NOTEPAD_DB_PATH` or a temp-dir default.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_init(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "notes_init failed: db_path cannot be empty".to_string();
    }

    let config = NotepadConfig {
        db_path: Some(PathBuf::from(trimmed)),
        ..NotepadConfig::from_env()
    };
    let mut opened = false;
    SESSION_STORE.get_or_init(|| {
        opened = true;
        Mutex::new(open_configured_store(&config))
    });

    if opened {
        info!("event=notes_init module=ffi status=ok db_path={trimmed}");
        String::new()
    } else {
        "notes_init failed: note store already initialized".to_string()
    }
}

/// One note as rendered by a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// Relative label such as `há 5 minutos`.
    pub created_label: String,
}

/// List/search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    /// Whether storage currently lags behind the list.
    pub diverged: bool,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the in-memory change was applied.
    pub ok: bool,
    pub note_id: Option<String>,
    /// `success|warning|alert`.
    pub level: String,
    /// Message to show the user.
    pub message: String,
}

impl NoteActionResponse {
    fn from_notice(ok: bool, note_id: Option<NoteId>, notice: Notice) -> Self {
        Self {
            ok,
            note_id: note_id.map(|id| id.to_string()),
            level: notice_level_label(notice.level).to_string(),
            message: notice.message.to_string(),
        }
    }

    fn invalid_id(raw: &str) -> Self {
        Self {
            ok: false,
            note_id: None,
            level: notice_level_label(NoticeLevel::Warning).to_string(),
            message: format!("invalid note id `{raw}`"),
        }
    }
}

/// Lists all notes, most recent first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    notes_search(String::new())
}

/// Filters notes by case-insensitive substring; empty query lists all.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_search(query: String) -> NotesListResponse {
    let store = lock_store();
    let now = Utc::now();
    NotesListResponse {
        items: store
            .search(&query)
            .into_iter()
            .map(|note| to_note_item(note, now))
            .collect(),
        diverged: store.is_diverged(),
    }
}

/// Creates a note from typed or dictated content.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create(content: String) -> NoteActionResponse {
    let result = lock_store().create(content);
    let notice = Notice::for_result(NoteAction::Created, &result);
    let note_id = result.as_ref().ok().map(|mutation| mutation.value.id());
    NoteActionResponse::from_notice(result.is_ok(), note_id, notice)
}

/// Replaces the content of one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(note_id: String, content: String) -> NoteActionResponse {
    let Some(id) = parse_note_id(&note_id) else {
        return NoteActionResponse::invalid_id(&note_id);
    };
    let result = lock_store().update(id, content);
    let notice = Notice::for_result(NoteAction::Updated, &result);
    NoteActionResponse::from_notice(result.is_ok(), Some(id), notice)
}

/// Deletes one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: String) -> NoteActionResponse {
    let Some(id) = parse_note_id(&note_id) else {
        return NoteActionResponse::invalid_id(&note_id);
    };
    let result = lock_store().delete(id);
    let notice = Notice::for_result(NoteAction::Deleted, &result);
    NoteActionResponse::from_notice(result.is_ok(), Some(id), notice)
}

/// Retries persisting the full list after a save failure.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_sync() -> String {
    match lock_store().sync() {
        Ok(()) => String::new(),
        Err(err) => format!("notes_sync failed: {err}"),
    }
}

fn lock_store() -> MutexGuard<'static, ConfiguredNoteStore> {
    let store = SESSION_STORE.get_or_init(|| {
        let mut config = NotepadConfig::from_env();
        if config.db_path.is_none() {
            config.db_path = Some(std::env::temp_dir().join(SESSION_DB_FILE_NAME));
        }
        Mutex::new(open_configured_store(&config))
    });
    // Store operations mutate in one step, so a poisoned guard is consistent.
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_note_id(raw: &str) -> Option<NoteId> {
    NoteId::parse_str(raw.trim()).ok()
}

fn to_note_item(note: &Note, now: chrono::DateTime<Utc>) -> NoteItem {
    NoteItem {
        id: note.id().to_string(),
        content: note.content().to_string(),
        created_at: note.created_at().to_rfc3339(),
        created_label: relative_time(note.created_at(), now),
    }
}

fn notice_level_label(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Alert => "alert",
    }
}
