//! Dictation session: speech-to-text as a side input for note content.
//!
//! # Responsibility
//! - Model one recording lifecycle (`start` -> results* -> `stop`) as an
//!   explicit object owned by the caller.
//! - Accumulate recognition results into a single transcript string.
//!
//! # Invariants
//! - At most one recording is active per session.
//! - The transcript is recomputed from the full result list on every event,
//!   so interim results are replaced rather than appended twice.
//! - The note store never sees fragments, only the final transcript.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transcription language used by the browser widget.
pub const DEFAULT_DICTATION_LOCALE: &str = "pt-BR";

/// Recognition parameters handed to the transcriber on start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    /// BCP-47 language tag.
    pub lang: String,
    /// Keep listening until explicitly stopped.
    pub continuous: bool,
    /// Emit partial results while the user is still speaking.
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl RecognitionSettings {
    pub fn for_locale(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Self::default()
        }
    }
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            lang: DEFAULT_DICTATION_LOCALE.to_string(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

/// One recognition result; the first alternative is the best guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub alternatives: Vec<String>,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn new(transcript: impl Into<String>, is_final: bool) -> Self {
        Self {
            alternatives: vec![transcript.into()],
            is_final,
        }
    }

    fn best(&self) -> &str {
        self.alternatives.first().map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationError {
    /// Speech capability is absent on this platform.
    Unavailable,
    AlreadyActive,
    NotActive,
    /// Backend-specific failure.
    Backend(String),
}

impl Display for DictationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "speech recognition is not supported"),
            Self::AlreadyActive => write!(f, "dictation is already recording"),
            Self::NotActive => write!(f, "dictation is not recording"),
            Self::Backend(message) => write!(f, "speech recognition failed: {message}"),
        }
    }
}

impl Error for DictationError {}

/// Speech recognition backend.
pub trait Transcriber {
    /// Whether the platform offers speech recognition at all.
    fn is_available(&self) -> bool;
    fn start(&mut self, settings: &RecognitionSettings) -> Result<(), DictationError>;
    fn stop(&mut self) -> Result<(), DictationError>;
}

/// Recording lifecycle and transcript accumulator.
#[derive(Debug, Clone, Default)]
pub struct DictationSession {
    settings: RecognitionSettings,
    recording: bool,
    transcript: String,
}

impl DictationSession {
    pub fn new(settings: RecognitionSettings) -> Self {
        Self {
            settings,
            recording: false,
            transcript: String::new(),
        }
    }

    pub fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Starts recording through `transcriber` and clears the transcript.
    pub fn start(&mut self, transcriber: &mut dyn Transcriber) -> Result<(), DictationError> {
        if self.recording {
            return Err(DictationError::AlreadyActive);
        }
        if !transcriber.is_available() {
            info!("event=dictation_start module=dictation status=unavailable");
            return Err(DictationError::Unavailable);
        }

        transcriber.start(&self.settings)?;
        self.recording = true;
        self.transcript.clear();
        info!(
            "event=dictation_start module=dictation status=ok lang={}",
            self.settings.lang
        );
        Ok(())
    }

    /// Rebuilds the transcript from the full result list of one event.
    ///
    /// Ignored when not recording.
    pub fn on_results(&mut self, results: &[RecognitionResult]) {
        if !self.recording {
            return;
        }
        self.transcript = results.iter().map(RecognitionResult::best).collect();
    }

    /// Logs a backend error; recording state is left untouched.
    pub fn on_error(&mut self, err: &DictationError) {
        error!("event=dictation_error module=dictation status=error error={err}");
    }

    pub fn stop(&mut self, transcriber: &mut dyn Transcriber) -> Result<(), DictationError> {
        if !self.recording {
            return Err(DictationError::NotActive);
        }
        self.recording = false;
        transcriber.stop()?;
        info!(
            "event=dictation_stop module=dictation status=ok chars={}",
            self.transcript.chars().count()
        );
        Ok(())
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Hands the accumulated transcript to the caller and resets it.
    pub fn take_transcript(&mut self) -> String {
        std::mem::take(&mut self.transcript)
    }
}
