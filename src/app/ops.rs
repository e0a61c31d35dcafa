//! Pure operations over a note list.
//!
//! Nothing in here touches a backend. Each mutation takes the current list and
//! returns the next one, so the caller decides when the result is persisted and
//! committed.

use super::clock::{epoch_millis, format_date};
use crate::{BackendError, Note, NoteValidationError, Result};
use chrono::{DateTime, Local};

/// Reject content that is empty after trimming whitespace
///
/// # Errors
///
/// Returns `NoteValidationError::ContentEmpty` if `content` is blank
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        Err(NoteValidationError::ContentEmpty.into())
    } else {
        Ok(())
    }
}

/// Time-derived id that is strictly larger than every id already in `notes`
///
/// # Errors
///
/// Returns `NoteValidationError::IdSpaceExhausted` if some note already holds `u64::MAX`
pub fn next_id(notes: &[Note], now_ms: u64) -> Result<u64> {
    let Some(largest) = notes.iter().map(|note| note.id).max() else {
        return Ok(now_ms);
    };
    let floor = largest
        .checked_add(1)
        .ok_or(NoteValidationError::IdSpaceExhausted)?;
    Ok(floor.max(now_ms))
}

/// Append a new note holding the untrimmed `content`
///
/// # Errors
///
/// - `NoteValidationError::ContentEmpty` if `content` is blank
/// - `NoteValidationError::IdSpaceExhausted` if no larger id is left
///
/// The input list is left untouched either way.
pub fn add(notes: &[Note], content: &str, now: &DateTime<Local>) -> Result<Vec<Note>> {
    validate_content(content)?;

    let note = Note {
        id: next_id(notes, epoch_millis(now))?,
        content: content.to_string(),
        created_at: format_date(now),
    };

    let mut next = notes.to_vec();
    next.push(note);
    Ok(next)
}

/// Drop every note with a matching id. Unknown ids are a no-op
#[must_use]
pub fn remove(notes: &[Note], id: u64) -> Vec<Note> {
    notes.iter().filter(|note| note.id != id).cloned().collect()
}

/// Pop a note back into the draft: returns its content and the list without it
///
/// # Errors
///
/// Returns `NoteValidationError::NoteNotFound` if no note has this id
pub fn begin_edit(notes: &[Note], id: u64) -> Result<(String, Vec<Note>)> {
    let content = notes
        .iter()
        .find(|note| note.id == id)
        .map(|note| note.content.clone())
        .ok_or(NoteValidationError::NoteNotFound(id))?;

    Ok((content, remove(notes, id)))
}

/// Empty list when `confirmed`, otherwise the list as-is
#[must_use]
pub fn clear_all(notes: &[Note], confirmed: bool) -> Vec<Note> {
    if confirmed { Vec::new() } else { notes.to_vec() }
}

/// Case-insensitive literal substring match on content, order preserved
#[must_use]
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note.content.to_lowercase().contains(&needle))
        .collect()
}

/// Serialize the whole list into its stored JSON form
///
/// # Errors
///
/// Returns `BackendError::MalformedState` if serialization fails
pub fn encode(notes: &[Note]) -> Result<String> {
    serde_json::to_string(notes).map_err(|e| BackendError::MalformedState(e).into())
}

/// Parse the stored JSON form back into a list
///
/// # Errors
///
/// Returns `BackendError::MalformedState` if `raw` is not a JSON array of notes
pub fn decode(raw: &str) -> Result<Vec<Note>> {
    serde_json::from_str(raw).map_err(|e| BackendError::MalformedState(e).into())
}
