//! User-facing feedback for store outcomes.
//!
//! Maps operation results to the transient messages the UI shows. Messages
//! are Brazilian Portuguese, as in the browser widget.

use crate::dictation::DictationError;
use crate::store::note_store::{Mutation, NoteError};

/// How the UI should present a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Transient confirmation toast.
    Success,
    /// Non-blocking warning; state may be inconsistent.
    Warning,
    /// Blocking alert the user must dismiss.
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

/// Store operation a notice is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Created,
    Updated,
    Deleted,
}

pub const NOTE_CREATED: &str = "Nota criada com sucesso";
pub const NOTE_UPDATED: &str = "Nota editada com sucesso!";
pub const NOTE_DELETED: &str = "Nota removida com sucesso!";
pub const NOTE_EMPTY: &str = "A nota não pode estar vazia.";
pub const NOTE_NOT_FOUND: &str = "Nota não encontrada.";
pub const SAVE_FAILED: &str =
    "Não foi possível salvar as notas; as alterações podem ser perdidas.";
pub const DICTATION_UNAVAILABLE: &str =
    "Infelizmente seu navegador não suporta a API de gravação";
pub const DICTATION_FAILED: &str = "Não foi possível gravar a nota.";

impl Notice {
    const fn new(level: NoticeLevel, message: &'static str) -> Self {
        Self { level, message }
    }

    /// Confirmation for an applied mutation, or a warning when it was not
    /// persisted.
    pub fn for_mutation<T>(action: NoteAction, mutation: &Mutation<T>) -> Self {
        if !mutation.is_persisted() {
            return Self::new(NoticeLevel::Warning, SAVE_FAILED);
        }
        let message = match action {
            NoteAction::Created => NOTE_CREATED,
            NoteAction::Updated => NOTE_UPDATED,
            NoteAction::Deleted => NOTE_DELETED,
        };
        Self::new(NoticeLevel::Success, message)
    }

    pub fn for_error(err: &NoteError) -> Self {
        match err {
            NoteError::EmptyContent => Self::new(NoticeLevel::Alert, NOTE_EMPTY),
            NoteError::NotFound(_) => Self::new(NoticeLevel::Warning, NOTE_NOT_FOUND),
        }
    }

    pub fn for_dictation_error(err: &DictationError) -> Self {
        match err {
            DictationError::Unavailable => Self::new(NoticeLevel::Alert, DICTATION_UNAVAILABLE),
            _ => Self::new(NoticeLevel::Warning, DICTATION_FAILED),
        }
    }

    /// Convenience over a full store result.
    pub fn for_result<T>(action: NoteAction, result: &Result<Mutation<T>, NoteError>) -> Self {
        match result {
            Ok(mutation) => Self::for_mutation(action, mutation),
            Err(err) => Self::for_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NoticeLevel, NoteAction, NOTE_DELETED, NOTE_EMPTY, SAVE_FAILED};
    use crate::dictation::DictationError;
    use crate::persistence::PersistenceError;
    use crate::storage::StorageError;
    use crate::store::note_store::{Mutation, NoteError};

    #[test]
    fn persisted_mutation_yields_success_toast() {
        let mutation = Mutation {
            value: (),
            persist_error: None,
        };
        let notice = Notice::for_mutation(NoteAction::Deleted, &mutation);
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, NOTE_DELETED);
    }

    #[test]
    fn created_and_updated_toasts_keep_widget_wording() {
        let mutation = Mutation {
            value: (),
            persist_error: None,
        };
        assert_eq!(
            Notice::for_mutation(NoteAction::Created, &mutation).message,
            "Nota criada com sucesso"
        );
        assert_eq!(
            Notice::for_mutation(NoteAction::Updated, &mutation).message,
            "Nota editada com sucesso!"
        );
    }

    #[test]
    fn unpersisted_mutation_yields_warning() {
        let mutation = Mutation {
            value: (),
            persist_error: Some(PersistenceError::Storage(StorageError::Unavailable(
                "disk full".to_string(),
            ))),
        };
        let notice = Notice::for_mutation(NoteAction::Created, &mutation);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, SAVE_FAILED);
    }

    #[test]
    fn empty_content_is_blocking_alert() {
        let notice = Notice::for_error(&NoteError::EmptyContent);
        assert_eq!(notice.level, NoticeLevel::Alert);
        assert_eq!(notice.message, NOTE_EMPTY);
    }

    #[test]
    fn missing_speech_capability_is_blocking_alert() {
        let notice = Notice::for_dictation_error(&DictationError::Unavailable);
        assert_eq!(notice.level, NoticeLevel::Alert);
    }
}
