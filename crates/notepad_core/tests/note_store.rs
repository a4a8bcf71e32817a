use notepad_core::{
    KeyValueNotePersistence, MemoryKeyValueStore, Note, NoteError, NotePersistence, NoteStore,
    PersistenceResult,
};
use uuid::Uuid;

/// Counts saves and otherwise behaves like an empty in-memory adapter.
#[derive(Default)]
struct CountingPersistence {
    saves: usize,
    last: Vec<Note>,
}

impl NotePersistence for CountingPersistence {
    fn load(&self) -> Vec<Note> {
        self.last.clone()
    }

    fn save(&mut self, notes: &[Note]) -> PersistenceResult<()> {
        self.saves += 1;
        self.last = notes.to_vec();
        Ok(())
    }
}

fn memory_store() -> NoteStore<KeyValueNotePersistence<MemoryKeyValueStore>> {
    NoteStore::open(KeyValueNotePersistence::new(MemoryKeyValueStore::new()))
}

fn contents(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(Note::content).collect()
}

fn assert_in_sync(store: &NoteStore<KeyValueNotePersistence<MemoryKeyValueStore>>) {
    assert_eq!(store.persistence().load(), store.list().to_vec());
}

#[test]
fn create_orders_most_recent_first() {
    let mut store = memory_store();
    store.create("a").unwrap();
    store.create("b").unwrap();
    store.create("c").unwrap();

    assert_eq!(contents(store.list()), ["c", "b", "a"]);
}

#[test]
fn every_mutation_leaves_storage_equal_to_memory() {
    let mut store = memory_store();
    let first = store.create("first").unwrap().into_value();
    assert_in_sync(&store);
    let second = store.create("second").unwrap().into_value();
    assert_in_sync(&store);
    store.create("third").unwrap();
    assert_in_sync(&store);

    store.update(first.id(), "first, edited").unwrap();
    assert_in_sync(&store);

    store.delete(second.id()).unwrap();
    assert_in_sync(&store);

    assert_eq!(contents(store.list()), ["third", "first, edited"]);
}

#[test]
fn blank_content_never_mutates_or_saves() {
    let mut store = NoteStore::open(CountingPersistence::default());
    assert_eq!(store.create("").unwrap_err(), NoteError::EmptyContent);
    assert_eq!(store.create("  \n").unwrap_err(), NoteError::EmptyContent);
    assert_eq!(store.persistence().saves, 0);

    let note = store.create("keep").unwrap().into_value();
    assert_eq!(store.persistence().saves, 1);

    assert_eq!(store.update(note.id(), "").unwrap_err(), NoteError::EmptyContent);
    assert_eq!(store.update(note.id(), "\t").unwrap_err(), NoteError::EmptyContent);
    assert_eq!(store.persistence().saves, 1);
    assert_eq!(contents(store.list()), ["keep"]);
}

#[test]
fn update_preserves_identity_timestamp_and_position() {
    let mut store = memory_store();
    let older = store.create("older").unwrap().into_value();
    store.create("newer").unwrap();

    let updated = store.update(older.id(), "older v2").unwrap().into_value();
    assert_eq!(updated.id(), older.id());
    assert_eq!(updated.created_at(), older.created_at());
    assert_eq!(contents(store.list()), ["newer", "older v2"]);
}

#[test]
fn unknown_ids_are_rejected_without_changes() {
    let mut store = NoteStore::open(CountingPersistence::default());
    store.create("only").unwrap();
    let before = store.list().to_vec();
    let missing = Uuid::new_v4();

    assert_eq!(store.delete(missing).unwrap_err(), NoteError::NotFound(missing));
    assert_eq!(
        store.update(missing, "text").unwrap_err(),
        NoteError::NotFound(missing)
    );
    assert_eq!(store.list(), before.as_slice());
    assert_eq!(store.persistence().saves, 1);
}

#[test]
fn search_is_case_insensitive_and_empty_query_lists_all() {
    let mut store = memory_store();
    store.create("Walk dog").unwrap();
    let milk = store.create("Buy milk").unwrap().into_value();

    let hits = store.search("MILK");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), milk.id());

    let all = store.search("");
    let listed = store.list().iter().collect::<Vec<_>>();
    assert_eq!(all, listed);

    assert!(store.search("cat").is_empty());
}

#[test]
fn reopening_restores_notes_from_storage() {
    let mut store = memory_store();
    store.create("persisted one").unwrap();
    store.create("persisted two").unwrap();
    let expected = store.list().to_vec();

    let backend = store.into_persistence().into_store();
    let reopened = NoteStore::open(KeyValueNotePersistence::new(backend));
    assert_eq!(reopened.list(), expected.as_slice());
}

#[test]
fn reads_do_not_touch_storage() {
    let mut store = NoteStore::open(CountingPersistence::default());
    store.create("x").unwrap();
    let _ = store.list();
    let _ = store.search("x");
    let _ = store.get(Uuid::new_v4());
    assert_eq!(store.persistence().saves, 1);
}

#[test]
fn ids_are_unique_across_many_creates() {
    let mut store = memory_store();
    for idx in 0..50 {
        store.create(format!("note {idx}")).unwrap();
    }
    let mut ids = store.list().iter().map(Note::id).collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}
