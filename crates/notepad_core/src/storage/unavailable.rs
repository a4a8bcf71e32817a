//! Placeholder backend for when no real store could be opened.
//!
//! Reads yield nothing and writes fail, so every mutation reports a
//! persistence warning instead of silently dropping data.

use super::{KeyValueStore, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct UnavailableKeyValueStore {
    reason: String,
}

impl UnavailableKeyValueStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn error(&self) -> StorageError {
        StorageError::Unavailable(self.reason.clone())
    }
}

impl KeyValueStore for UnavailableKeyValueStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(self.error())
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(self.error())
    }

    fn remove(&mut self, _key: &str) -> StorageResult<()> {
        Err(self.error())
    }
}
