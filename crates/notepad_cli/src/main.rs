//! Command-line front end for `notepad_core`.
//!
//! # Responsibility
//! - Map subcommands onto note store use-cases.
//! - Print the same notices a graphical front end would show.
//!
//! # Invariants
//! - One store is opened per invocation and every mutation goes through it.
//! - Notes always land in a SQLite file; there is no in-memory default.

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::warn;
use notepad_core::{
    init_logging, open_configured_store, relative_time, ConfiguredNoteStore, DictationError,
    DictationSession, Note, NoteAction, NoteId, NotepadConfig, Notice, NoticeLevel,
    RecognitionResult, RecognitionSettings, Transcriber,
};
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notepad", version, about = "Create, search, edit and delete short notes")]
struct Cli {
    /// JSON config file (see `NotepadConfig`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file holding the notes; overrides the config value.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List notes, most recent first.
    List,
    /// Show notes containing the query (case-insensitive).
    Search { query: String },
    /// Create a note.
    Add {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Replace the content of a note.
    Edit {
        id: NoteId,
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Delete a note.
    Rm { id: NoteId },
    /// Create a note from transcribed lines read on stdin until EOF.
    Dictate,
}

const DATA_DIR_NAME: &str = "notepad";
const DB_FILE_NAME: &str = "notes.sqlite3";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli, dirs::data_dir()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut store = open_configured_store(&config);
    if execute(cli.command, &mut store, &config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn execute(command: Command, store: &mut ConfiguredNoteStore, config: &NotepadConfig) -> bool {
    match command {
        Command::List => {
            print_notes(store.list().iter());
            true
        }
        Command::Search { query } => {
            print_notes(store.search(&query).into_iter());
            true
        }
        Command::Add { words } => {
            let result = store.create(words.join(" "));
            report(Notice::for_result(NoteAction::Created, &result), result.ok().map(|m| m.value))
        }
        Command::Edit { id, words } => {
            let result = store.update(id, words.join(" "));
            report(Notice::for_result(NoteAction::Updated, &result), result.ok().map(|m| m.value))
        }
        Command::Rm { id } => {
            let result = store.delete(id);
            report(Notice::for_result(NoteAction::Deleted, &result), None)
        }
        Command::Dictate => dictate(store, config),
    }
}

/// Resolves config file, env overrides and `--db`, in that order.
///
/// Without any database path the notes go to `<data_dir>/notepad/notes.sqlite3`,
/// or under the temp dir when the platform has no data dir.
fn load_config(cli: &Cli, data_dir: Option<PathBuf>) -> Result<NotepadConfig, String> {
    let base = match cli.config.as_ref() {
        Some(path) => NotepadConfig::load(path).map_err(|err| err.to_string())?,
        None => NotepadConfig::default(),
    };
    let mut config = base.with_env_overrides();
    if let Some(db) = cli.db.clone() {
        config.db_path = Some(db);
    }
    if config.db_path.is_none() {
        config.db_path = Some(default_db_path(data_dir)?);
    }
    Ok(config)
}

fn default_db_path(data_dir: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = data_dir
        .unwrap_or_else(std::env::temp_dir)
        .join(DATA_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("cannot create data directory {}: {err}", dir.display()))?;
    Ok(dir.join(DB_FILE_NAME))
}

/// Treats each stdin line as one final recognition result.
struct StdinTranscriber {
    lines: Vec<String>,
}

impl Transcriber for StdinTranscriber {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, _settings: &RecognitionSettings) -> Result<(), DictationError> {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.map_err(|err| DictationError::Backend(err.to_string()))?;
            self.lines.push(line);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DictationError> {
        Ok(())
    }
}

fn dictate(store: &mut ConfiguredNoteStore, config: &NotepadConfig) -> bool {
    let mut session =
        DictationSession::new(RecognitionSettings::for_locale(config.dictation_locale.clone()));
    let mut transcriber = StdinTranscriber { lines: Vec::new() };

    if let Err(err) = session.start(&mut transcriber) {
        session.on_error(&err);
        return report(Notice::for_dictation_error(&err), None);
    }

    let results = transcriber
        .lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, line)| {
            let text = if idx == 0 {
                line.trim().to_string()
            } else {
                format!(" {}", line.trim())
            };
            RecognitionResult::new(text, true)
        })
        .collect::<Vec<_>>();
    session.on_results(&results);

    if let Err(err) = session.stop(&mut transcriber) {
        warn!("event=dictation_stop module=cli status=error error={err}");
    }

    let result = store.create(session.take_transcript());
    report(Notice::for_result(NoteAction::Created, &result), result.ok().map(|m| m.value))
}

fn report(notice: Notice, note: Option<Note>) -> bool {
    match notice.level {
        NoticeLevel::Success => println!("{}", notice.message),
        NoticeLevel::Warning | NoticeLevel::Alert => eprintln!("{}", notice.message),
    }
    if let Some(note) = note {
        print_notes(std::iter::once(&note));
    }
    notice.level == NoticeLevel::Success
}

fn print_notes<'a>(notes: impl Iterator<Item = &'a Note>) {
    let now = Utc::now();
    for note in notes {
        println!("{}  {}", note.id(), relative_time(note.created_at(), now));
        for line in note.content().lines() {
            println!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, load_config, Cli, DATA_DIR_NAME, DB_FILE_NAME};
    use clap::Parser;
    use notepad_core::open_configured_store;

    fn run(data_dir: &std::path::Path, args: &[&str]) -> bool {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let config = load_config(&cli, Some(data_dir.to_path_buf())).expect("config");
        let mut store = open_configured_store(&config);
        execute(cli.command, &mut store, &config)
    }

    #[test]
    fn default_database_lives_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["notepad", "list"]).unwrap();
        let config = load_config(&cli, Some(dir.path().to_path_buf())).unwrap();

        let db_path = config.db_path.expect("a database path is always set");
        if std::env::var_os("NOTEPAD_DB_PATH").is_none() {
            assert_eq!(db_path, dir.path().join(DATA_DIR_NAME).join(DB_FILE_NAME));
            assert!(dir.path().join(DATA_DIR_NAME).is_dir());
        }
    }

    #[test]
    fn db_flag_overrides_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.sqlite3");
        let cli =
            Cli::try_parse_from(["notepad", "--db", explicit.to_str().unwrap(), "list"]).unwrap();
        let config = load_config(&cli, Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.db_path, Some(explicit));
    }

    #[test]
    fn added_note_is_visible_to_next_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.sqlite3");
        let db = db.to_str().unwrap();

        assert!(run(dir.path(), &["notepad", "--db", db, "add", "comprar", "leite"]));
        assert!(run(dir.path(), &["notepad", "--db", db, "list"]));

        let cli = Cli::try_parse_from(["notepad", "--db", db, "list"]).unwrap();
        let config = load_config(&cli, Some(dir.path().to_path_buf())).unwrap();
        let store = open_configured_store(&config);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].content(), "comprar leite");
    }

    #[test]
    fn added_note_persists_without_any_path_configured() {
        if std::env::var_os("NOTEPAD_DB_PATH").is_some() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["notepad", "add", "sem", "caminho"]));

        let cli = Cli::try_parse_from(["notepad", "list"]).unwrap();
        let config = load_config(&cli, Some(dir.path().to_path_buf())).unwrap();
        let store = open_configured_store(&config);
        assert_eq!(store.list()[0].content(), "sem caminho");
    }

    #[test]
    fn blank_note_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("blank.sqlite3");
        assert!(!run(dir.path(), &["notepad", "--db", db.to_str().unwrap(), "add", " "]));
    }
}
