//! Runtime configuration for note sessions.
//!
//! # Invariants
//! - Every field has a default, so an empty JSON object is a valid config.
//! - `storage_key` and `dictation_locale` are never blank after validation.

use crate::dictation::DEFAULT_DICTATION_LOCALE;
use crate::logging::default_log_level;
use crate::persistence::DEFAULT_STORAGE_KEY;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const ENV_DB_PATH: &str = "NOTEPAD_DB_PATH";
const ENV_LOG_LEVEL: &str = "NOTEPAD_LOG_LEVEL";
const ENV_LOG_DIR: &str = "NOTEPAD_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotepadConfig {
    /// Key of the key-value entry holding the note list.
    pub storage_key: String,
    /// Language tag passed to speech recognition.
    pub dictation_locale: String,
    /// SQLite file backing the store; `None` keeps notes in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            dictation_locale: DEFAULT_DICTATION_LOCALE.to_string(),
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl NotepadConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `NOTEPAD_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlays non-blank `NOTEPAD_DB_PATH`, `NOTEPAD_LOG_LEVEL` and
    /// `NOTEPAD_LOG_DIR` values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(value) = env_value(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_value(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = env_value(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key cannot be empty".to_string()));
        }
        if self.dictation_locale.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dictation_locale cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotepadConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_object_uses_defaults() {
        let config = NotepadConfig::from_json("{}").unwrap();
        assert_eq!(config, NotepadConfig::default());
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.dictation_locale, "pt-BR");
        assert!(config.db_path.is_none());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config = NotepadConfig::from_json(
            r#"{"storage_key":"work-notes","db_path":"/tmp/notes.sqlite3","dictation_locale":"en-US"}"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "work-notes");
        assert_eq!(config.dictation_locale, "en-US");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/notes.sqlite3")));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let err = NotepadConfig::from_json(r#"{"storage_key":"  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = NotepadConfig::from_json(r#"{"storage":"notes"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = NotepadConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
