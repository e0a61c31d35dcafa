mod common;

use common::{FixedClock, FlakyBackend, NOW, memory_store, stored};
use jotters::app::NoteStore;
use jotters::backends::MemoryBackend;
use jotters::{KeyValueStore, NOTES_KEY, NoteError, NoteValidationError};

#[test]
fn starts_empty_when_nothing_is_stored() {
    let (store, backend) = memory_store();
    assert!(store.notes().is_empty());
    // Hydrating alone writes nothing
    assert_eq!(backend.get(NOTES_KEY).unwrap(), None);
}

#[test]
fn starts_empty_when_stored_value_is_malformed() {
    for raw in ["not json", "{\"id\":1}", "[{\"content\":\"no id\"}]", "null"] {
        let backend = MemoryBackend::with_entry(NOTES_KEY, raw);
        let store = NoteStore::open(Box::new(backend), Box::new(FixedClock(NOW)));
        assert!(store.notes().is_empty(), "{raw} should load as empty");
    }
}

#[test]
fn hydrates_from_stored_value_in_order() {
    let raw = r#"[
        {"id": 3, "content": "third", "date": "d3"},
        {"id": 1, "content": "first", "date": "d1"}
    ]"#;
    let backend = MemoryBackend::with_entry(NOTES_KEY, raw);
    let store = NoteStore::open(Box::new(backend), Box::new(FixedClock(NOW)));

    let contents: Vec<&str> = store.notes().iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, vec!["third", "first"]);
    assert_eq!(store.notes()[1].created_at, "d1");
}

#[test]
fn empty_content_is_refused_without_persisting() {
    let (mut store, backend) = memory_store();
    store.add("keep me").unwrap();
    let before = backend.get(NOTES_KEY).unwrap();

    for blank in ["", "   ", "\n\t"] {
        let err = store.add(blank).unwrap_err();
        assert!(matches!(
            err,
            NoteError::Validation(NoteValidationError::ContentEmpty)
        ));
        assert_eq!(err.to_string(), "Note cannot be empty!");
    }

    assert_eq!(store.notes().len(), 1);
    assert_eq!(backend.get(NOTES_KEY).unwrap(), before);
}

#[test]
fn add_appends_with_fresh_increasing_ids() {
    let (mut store, backend) = memory_store();

    let first = store.add("one").unwrap();
    let second = store.add("two").unwrap();
    let third = store.add(" three ").unwrap();

    assert_eq!(first, NOW as u64);
    assert!(second > first);
    assert!(third > second);

    let last = store.notes().last().unwrap();
    assert_eq!(last.id, third);
    assert_eq!(last.content, " three ");
    assert_eq!(stored(&backend), store.notes());
}

#[test]
fn remove_unknown_id_changes_nothing_but_still_persists() {
    let (mut store, backend) = memory_store();
    store.add("one").unwrap();
    let before = store.notes().to_vec();

    store.remove(42).unwrap();

    assert_eq!(store.notes(), before.as_slice());
    assert_eq!(stored(&backend), before);
}

#[test]
fn begin_edit_moves_content_into_draft() {
    let (mut store, backend) = memory_store();
    let a = store.add("alpha").unwrap();
    let b = store.add("beta").unwrap();

    let draft = store.begin_edit(a).unwrap();

    assert_eq!(draft, "alpha");
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].id, b);
    assert_eq!(stored(&backend), store.notes());
}

#[test]
fn begin_edit_unknown_id_is_not_found_and_changes_nothing() {
    let (mut store, backend) = memory_store();
    store.add("alpha").unwrap();
    let before = backend.get(NOTES_KEY).unwrap();

    let err = store.begin_edit(7).unwrap_err();

    assert!(matches!(
        err,
        NoteError::Validation(NoteValidationError::NoteNotFound(7))
    ));
    assert_eq!(store.notes().len(), 1);
    assert_eq!(backend.get(NOTES_KEY).unwrap(), before);
}

#[test]
fn clear_all_only_when_confirmed() {
    let (mut store, backend) = memory_store();
    store.add("one").unwrap();
    store.add("two").unwrap();

    store.clear_all(false).unwrap();
    assert_eq!(store.notes().len(), 2);
    assert_eq!(stored(&backend).len(), 2);

    store.clear_all(true).unwrap();
    assert!(store.notes().is_empty());
    assert!(stored(&backend).is_empty());
}

#[test]
fn persist_then_load_round_trips() {
    let (mut store, backend) = memory_store();
    store.add("one").unwrap();
    store.add("two\nlines").unwrap();
    store.add("ünïcødé ✓").unwrap();

    let reloaded = NoteStore::load(&backend);
    assert_eq!(reloaded, store.notes());

    NoteStore::persist(&backend, &reloaded[..1]).unwrap();
    assert_eq!(NoteStore::load(&backend), &reloaded[..1]);
}

#[test]
fn failed_write_keeps_previous_state() {
    let backend = FlakyBackend::default();
    let mut store = NoteStore::open(Box::new(backend.clone()), Box::new(FixedClock(NOW)));
    let id = store.add("safe").unwrap();

    backend.failing.set(true);
    assert!(store.add("lost").is_err());
    assert!(store.remove(id).is_err());
    assert!(store.begin_edit(id).is_err());
    assert!(store.clear_all(true).is_err());

    assert_eq!(store.notes().len(), 1);
    assert_eq!(stored(&backend.inner), store.notes());

    backend.failing.set(false);
    store.remove(id).unwrap();
    assert!(stored(&backend.inner).is_empty());
}

#[test]
fn filter_follows_case_insensitive_substring() {
    let (mut store, _backend) = memory_store();
    store.add("Buy milk").unwrap();
    store.add("call MOM").unwrap();
    store.add("Mombasa trip").unwrap();

    let found: Vec<&str> = store
        .filter("mom")
        .iter()
        .map(|n| n.content.as_str())
        .collect();
    assert_eq!(found, vec!["call MOM", "Mombasa trip"]);
    assert_eq!(store.filter("mom"), store.filter("MOM"));
    assert_eq!(store.filter("").len(), 3);
}

#[test]
fn end_to_end_scenario() {
    let (mut store, backend) = memory_store();

    let milk = store.add("buy milk").unwrap();
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "buy milk");
    assert_eq!(stored(&backend), store.notes());

    assert!(store.add("").is_err());
    assert_eq!(store.notes().len(), 1);
    assert_eq!(stored(&backend), store.notes());

    let mom = store.add("call mom").unwrap();
    assert_eq!(store.notes().len(), 2);
    assert_eq!(stored(&backend), store.notes());

    let found = store.filter("mom");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, mom);

    store.remove(milk).unwrap();
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "call mom");
    assert_eq!(stored(&backend), store.notes());

    store.clear_all(true).unwrap();
    assert!(store.notes().is_empty());
    assert_eq!(stored(&backend), store.notes());
}

#[test]
fn stored_note_with_largest_id_blocks_new_notes_instead_of_duplicating() {
    let raw = format!(r#"[{{"id": {}, "content": "edge", "date": "d"}}]"#, u64::MAX);
    let backend = MemoryBackend::with_entry(NOTES_KEY, &raw);
    let mut store = NoteStore::open(Box::new(backend.clone()), Box::new(FixedClock(NOW)));

    let err = store.add("new").unwrap_err();

    assert!(matches!(
        err,
        NoteError::Validation(NoteValidationError::IdSpaceExhausted)
    ));
    assert_eq!(store.notes().len(), 1);
    assert_eq!(backend.get(NOTES_KEY).unwrap().as_deref(), Some(raw.as_str()));

    store.remove(u64::MAX).unwrap();
    assert!(store.notes().is_empty());
    assert!(store.add("new").is_ok());
}
