//! JSON codec for the persisted note list.
//!
//! Wire shape: a JSON array of `{ "id", "date", "content" }` objects, where
//! `date` is ISO-8601 with millisecond precision. `createdAt` is accepted as
//! an alias of `date` on read.

use crate::model::note::Note;

/// Serializes the full note list.
pub fn encode_notes(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string(notes)
}

/// Deserializes a stored note list.
///
/// Timestamps are decoded into real `DateTime<Utc>` values; any malformed
/// entry fails the whole list.
pub fn decode_notes(raw: &str) -> serde_json::Result<Vec<Note>> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, encode_notes};
    use crate::model::note::Note;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn sample_notes() -> Vec<Note> {
        let base = Utc
            .with_ymd_and_hms(2023, 11, 5, 8, 30, 0)
            .single()
            .expect("valid base timestamp");
        vec![
            Note::with_parts(Uuid::new_v4(), base + Duration::milliseconds(987), "Comprar pão"),
            Note::with_parts(Uuid::new_v4(), base, "linha 1\nlinha \"2\""),
            Note::with_parts(Uuid::new_v4(), base - Duration::days(400), "ünïcødé ✓"),
        ]
    }

    #[test]
    fn decode_restores_encoded_list_exactly() {
        let notes = sample_notes();
        let raw = encode_notes(&notes).unwrap();
        assert_eq!(decode_notes(&raw).unwrap(), notes);
    }

    #[test]
    fn decode_accepts_widget_shape_and_created_at_alias() {
        let raw = r#"[
            {"id":"5f1c7d0e-6a3b-4c55-9a43-2f9f4a1b0c11","date":"2024-03-01T12:00:00.123Z","content":"Buy milk"},
            {"id":"0b7e8a52-13d4-4e8e-8f0f-1d2c3b4a5e6f","createdAt":"2024-02-28T09:15:00+03:00","content":"Walk dog"}
        ]"#;
        let notes = decode_notes(raw).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content(), "Buy milk");
        assert_eq!(
            notes[0].created_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap()
                + Duration::milliseconds(123)
        );
        assert_eq!(
            notes[1].created_at(),
            Utc.with_ymd_and_hms(2024, 2, 28, 6, 15, 0).single().unwrap()
        );
    }

    #[test]
    fn decode_rejects_raw_string_timestamps_that_are_not_iso() {
        let raw = r#"[{"id":"5f1c7d0e-6a3b-4c55-9a43-2f9f4a1b0c11","date":"yesterday","content":"x"}]"#;
        assert!(decode_notes(raw).is_err());
    }

    #[test]
    fn encode_empty_list_is_json_array() {
        assert_eq!(encode_notes(&[]).unwrap(), "[]");
    }
}
