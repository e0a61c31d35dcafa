//! Presentation state and the handlers that move it forward.
//!
//! `ViewState` is passed by value into each handler and the next state is
//! handed back together with the outcome. The notes themselves live in the
//! [`NoteStore`]; what to show is pulled through [`ViewState::view`].

use super::store::NoteStore;
use crate::{Note, Result};
use clap::ValueEnum;
use log::debug;
use std::fmt;

/// Display mode. Never persisted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Text in the compose field
    pub draft: String,
    /// Current search query
    pub search: String,
    pub theme: Theme,
}

/// Everything the presentation layer needs to render one frame
#[derive(Debug)]
pub struct View<'a> {
    pub theme: Theme,
    pub draft: &'a str,
    pub char_count: usize,
    pub search: &'a str,
    pub notes: Vec<&'a Note>,
    pub total: usize,
}

/// Pending "delete all notes?" question. Clearing only happens through
/// [`ClearRequest::resolve`]
#[derive(Debug)]
#[must_use = "a clear request does nothing until it is resolved"]
pub struct ClearRequest {
    note_count: usize,
}

impl ClearRequest {
    pub const PROMPT: &'static str = "Delete all notes?";

    /// First half of clearing: ask before anything is deleted
    pub fn new(store: &NoteStore) -> Self {
        Self {
            note_count: store.notes().len(),
        }
    }

    #[must_use]
    pub const fn note_count(&self) -> usize {
        self.note_count
    }

    /// Clears the store when `confirmed`, otherwise leaves it alone
    ///
    /// # Errors
    ///
    /// Returns any backend error from persisting the empty list
    pub fn resolve(self, store: &mut NoteStore, confirmed: bool) -> Result<()> {
        store.clear_all(confirmed)
    }
}

impl ViewState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_draft(self, draft: impl Into<String>) -> Self {
        Self {
            draft: draft.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    #[must_use]
    pub fn toggle_theme(self) -> Self {
        let theme = self.theme.toggled();
        debug!("Switched to {theme} mode");
        Self { theme, ..self }
    }

    /// Live character count of the draft
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.draft.chars().count()
    }

    /// Saves the draft as a new note. The draft is cleared on success and kept
    /// on failure
    pub fn save(self, store: &mut NoteStore) -> (Self, Result<u64>) {
        match store.add(&self.draft) {
            Ok(id) => (self.with_draft(String::new()), Ok(id)),
            Err(e) => (self, Err(e)),
        }
    }

    /// Moves a note back into the draft, replacing whatever was being composed.
    /// Unknown ids leave the state untouched
    pub fn edit(self, store: &mut NoteStore, id: u64) -> (Self, Result<()>) {
        match store.begin_edit(id) {
            Ok(draft) => (self.with_draft(draft), Ok(())),
            Err(e) => (self, Err(e)),
        }
    }

    pub fn delete(self, store: &mut NoteStore, id: u64) -> (Self, Result<()>) {
        let outcome = store.remove(id);
        (self, outcome)
    }

    #[must_use]
    pub fn view<'a>(&'a self, store: &'a NoteStore) -> View<'a> {
        View {
            theme: self.theme,
            draft: &self.draft,
            char_count: self.char_count(),
            search: &self.search,
            notes: store.filter(&self.search),
            total: store.notes().len(),
        }
    }
}
