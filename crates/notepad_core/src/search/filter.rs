//! Case-insensitive substring filter over notes.
//!
//! # Invariants
//! - Relative order of the input is preserved.
//! - An empty query returns every note.
//! - No match is an empty result, never an error.

use crate::model::note::Note;

/// Returns the notes whose content contains `query`, ignoring case.
///
/// Only the exact empty string counts as "no query"; whitespace is matched
/// literally.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes.iter().collect();
    }

    let lowered = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note.matches_lowered(&lowered))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::Note;

    fn contents<'a>(notes: &[&'a Note]) -> Vec<&'a str> {
        notes.iter().map(|note| note.content()).collect()
    }

    #[test]
    fn empty_query_returns_all_in_order() {
        let notes = vec![Note::new("Buy milk"), Note::new("Walk dog")];
        assert_eq!(contents(&filter_notes(&notes, "")), ["Buy milk", "Walk dog"]);
    }

    #[test]
    fn query_matches_case_insensitively() {
        let notes = vec![Note::new("Buy milk"), Note::new("Walk dog")];
        let hits = filter_notes(&notes, "MILK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), notes[0].id());
    }

    #[test]
    fn matches_non_ascii_case() {
        let notes = vec![Note::new("Reunião às 10h"), Note::new("ÁGUA")];
        assert_eq!(contents(&filter_notes(&notes, "REUNIÃO")), ["Reunião às 10h"]);
        assert_eq!(contents(&filter_notes(&notes, "água")), ["ÁGUA"]);
    }

    #[test]
    fn preserves_order_and_allows_empty_result() {
        let notes = vec![Note::new("a note"), Note::new("other"), Note::new("A NOTE again")];
        assert_eq!(
            contents(&filter_notes(&notes, "a note")),
            ["a note", "A NOTE again"]
        );
        assert!(filter_notes(&notes, "missing").is_empty());
    }

    #[test]
    fn whitespace_query_is_matched_literally() {
        let notes = vec![Note::new("two words"), Note::new("single")];
        assert_eq!(contents(&filter_notes(&notes, " ")), ["two words"]);
    }
}
