#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use jotters::app::{Clock, NoteStore};
use jotters::backends::MemoryBackend;
use jotters::{BackendError, KeyValueStore, NOTES_KEY, Note, NoteError, Result};
use std::cell::Cell;
use std::rc::Rc;

/// Always reports the same instant
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        Local.timestamp_millis_opt(self.0).unwrap()
    }
}

/// Backend whose writes can be switched off
#[derive(Clone, Default)]
pub struct FlakyBackend {
    pub inner: MemoryBackend,
    pub failing: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.get() {
            return Err(NoteError::Backend(BackendError::PermissionDenied));
        }
        self.inner.set(key, value)
    }
}

pub const NOW: i64 = 1_760_000_000_000;

pub fn memory_store() -> (NoteStore, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = NoteStore::open(Box::new(backend.clone()), Box::new(FixedClock(NOW)));
    (store, backend)
}

/// What the backend currently holds, decoded
pub fn stored(backend: &dyn KeyValueStore) -> Vec<Note> {
    let raw = backend.get(NOTES_KEY).unwrap().expect("nothing persisted");
    serde_json::from_str(&raw).unwrap()
}
