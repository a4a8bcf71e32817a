//! Note domain model.
//!
//! # Responsibility
//! - Define the single record owned by the note store.
//! - Validate user-provided content before any mutation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is captured once and never changes.
//! - `created_at` carries millisecond precision so the persisted ISO-8601
//!   form round-trips exactly.
//!
//! # See also
//! - crate::store

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// User-authored text entry with identity, creation time and content.
///
/// Fields are private: notes are minted by the store (or decoded from
/// storage) and only mutated through store operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    /// Serialized as `date` to match the persisted widget schema.
    #[serde(rename = "date", alias = "createdAt", with = "iso_millis")]
    created_at: DateTime<Utc>,
    content: String,
}

impl Note {
    /// Mints a new note with a generated id and the current timestamp.
    ///
    /// Callers must run [`validate_content`] first.
    pub(crate) fn new(content: impl Into<String>) -> Self {
        Self::with_parts(Uuid::new_v4(), Utc::now(), content)
    }

    /// Rebuilds a note from known parts.
    ///
    /// Sub-millisecond precision of `created_at` is dropped.
    pub(crate) fn with_parts(
        id: NoteId,
        created_at: DateTime<Utc>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            created_at: created_at.trunc_subsecs(3),
            content: content.into(),
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn replace_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Case-insensitive substring match over note content.
    ///
    /// `lowered_query` must already be lowercased.
    pub(crate) fn matches_lowered(&self, lowered_query: &str) -> bool {
        self.content.to_lowercase().contains(lowered_query)
    }
}

/// Content validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentValidationError {
    /// Content is empty or whitespace-only.
    Blank,
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "note content must not be blank"),
        }
    }
}

impl Error for ContentValidationError {}

/// Rejects empty and whitespace-only content.
pub fn validate_content(content: &str) -> Result<(), ContentValidationError> {
    if content.trim().is_empty() {
        return Err(ContentValidationError::Blank);
    }
    Ok(())
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|value| value.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|err| {
                serde::de::Error::custom(format!("invalid timestamp `{raw}`: {err}"))
            })
    }
}
