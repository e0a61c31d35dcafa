use super::clock::Clock;
use super::ops;
use crate::{KeyValueStore, NOTES_KEY, Note, Result};
use log::{debug, info, trace, warn};

/// In-memory note list kept in sync with a key-value backend.
///
/// Every successful mutation writes the complete list under [`NOTES_KEY`]
/// before it becomes visible here. If that write fails the list is left as it
/// was and the error is returned.
pub struct NoteStore {
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Creates a store hydrated from whatever `backend` currently holds
    #[must_use]
    pub fn open(backend: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let notes = Self::load(backend.as_ref());
        info!("Loaded {} note(s)", notes.len());
        Self {
            backend,
            clock,
            notes,
        }
    }

    /// Reads the stored list. Missing, unreadable or malformed values all yield
    /// an empty list
    #[must_use]
    pub fn load(backend: &dyn KeyValueStore) -> Vec<Note> {
        let raw = match backend.get(NOTES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing stored under '{NOTES_KEY}', starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed reading stored notes, starting empty: {e}");
                return Vec::new();
            }
        };
        trace!("Read stored notes: {raw}");

        ops::decode(&raw).unwrap_or_else(|e| {
            warn!("Ignoring stored notes: {e}");
            Vec::new()
        })
    }

    /// Overwrites the stored list with `notes`
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or the backend write fails
    pub fn persist(backend: &dyn KeyValueStore, notes: &[Note]) -> Result<()> {
        let raw = ops::encode(notes)?;
        backend.set(NOTES_KEY, &raw)?;
        trace!("Wrote stored notes: {raw}");
        Ok(())
    }

    /// All notes in insertion order
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes whose content contains `query`, ignoring case
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Note> {
        ops::filter(&self.notes, query)
    }

    /// Appends a new note and returns its ID
    ///
    /// # Errors
    ///
    /// - `NoteValidationError::ContentEmpty` if `content` is blank. Nothing is persisted.
    /// - Any backend error from persisting the new list
    pub fn add(&mut self, content: &str) -> Result<u64> {
        let now = self.clock.now();
        let next = ops::add(&self.notes, content, &now)?;
        let id = next.last().map_or(0, |note| note.id);
        self.commit(next)?;
        info!("Note saved with ID: {id}");
        Ok(id)
    }

    /// Removes the note with `id`. Unknown ids leave the list unchanged but are
    /// still persisted
    ///
    /// # Errors
    ///
    /// Returns any backend error from persisting the list
    pub fn remove(&mut self, id: u64) -> Result<()> {
        let next = ops::remove(&self.notes, id);
        let found = next.len() < self.notes.len();
        self.commit(next)?;
        if found {
            info!("Deleted note with ID: {id}");
        } else {
            debug!("No note with ID: {id}");
        }
        Ok(())
    }

    /// Removes the note with `id` and hands back its content as the new draft
    ///
    /// # Errors
    ///
    /// - `NoteValidationError::NoteNotFound` if no note has this ID. Nothing changes.
    /// - Any backend error from persisting the list
    pub fn begin_edit(&mut self, id: u64) -> Result<String> {
        let (draft, next) = ops::begin_edit(&self.notes, id)?;
        self.commit(next)?;
        info!("Moved note with ID {id} back into the draft");
        Ok(draft)
    }

    /// Deletes every note, but only when `confirmed`
    ///
    /// # Errors
    ///
    /// Returns any backend error from persisting the empty list
    pub fn clear_all(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            debug!("Clear all not confirmed, keeping {} note(s)", self.notes.len());
            return Ok(());
        }
        let next = ops::clear_all(&self.notes, confirmed);
        self.commit(next)?;
        info!("Cleared all notes");
        Ok(())
    }

    // Persist first, then swap in
    fn commit(&mut self, next: Vec<Note>) -> Result<()> {
        Self::persist(self.backend.as_ref(), &next)
            .inspect_err(|e| warn!("Keeping previous notes, persisting failed: {e}"))?;
        self.notes = next;
        Ok(())
    }
}
