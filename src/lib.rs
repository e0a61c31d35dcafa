#![deny(clippy::cargo)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::nursery)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![deny(clippy::suspicious)]
#![deny(clippy::pedantic)]

use serde::{Deserialize, Serialize};
use std::io;
use tabled::Tabled;
use thiserror::Error;

pub mod app;
pub mod backends;
pub mod setup;
pub mod ui;

// More convenient Result type
pub type Result<T> = std::result::Result<T, NoteError>;

/// Key under which the whole note list is stored
pub const NOTES_KEY: &str = "notes";

/// A single note. Serialized as `{"id": .., "content": .., "date": ..}`
#[derive(Tabled, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Note")]
    pub content: String,
    // Display-only, never parsed back
    #[serde(rename = "date")]
    #[tabled(rename = "Date")]
    pub created_at: String,
}

/// Trait to be implemented by all backends that hold the persisted notes.
///
/// Backends are plain key-value stores. The note list is written as one value
/// under [`NOTES_KEY`], replacing whatever was there before.
pub trait KeyValueStore {
    /// Fetches the value stored under `key`, or `None` if nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be written
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// Enum for all possible validation or repository-related errors
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] NoteValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

// Enum for all possible menu input errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read from stdin: {0}")]
    StdinReadError(io::Error),

    #[error("Couldn't convert '{0}' to a number. Please enter a number 1-8")]
    ParseError(String),

    #[error("Couldn't convert '{0}' to a MenuOption. Please enter a number 1-8")]
    InvalidOption(u8),

    #[error("Failed writing to stdout")]
    StdoutWriteError(io::Error),

    #[error("Reached end of input")]
    EndOfInput,
}

// Enum for all possible data and input validation errors
#[derive(Debug, Error)]
pub enum NoteValidationError {
    #[error("Note cannot be empty!")]
    ContentEmpty,

    #[error("Note not found with ID: {0}")]
    NoteNotFound(u64),

    #[error("No note IDs left: the largest possible ID is already taken")]
    IdSpaceExhausted,
}

// Enum for all possible repository/backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed opening database: {0}")]
    DatabaseOpenError(String),

    #[error("Failed creating `kv` table in database")]
    TableCreationError,

    #[error("Failed creating directory for notes")]
    DirectoryCreationError(io::Error),

    #[error("Failed writing note data to file")]
    FileWriteError(io::Error),

    #[error("Failed reading note data from file")]
    FileReadError(io::Error),

    #[error("Stored notes are improperly formatted: {0}")]
    MalformedState(#[from] serde_json::Error),

    #[error("Database is locked or busy")]
    DatabaseBusy,

    #[error("Database file is not a valid SQLite database")]
    NotADatabase,

    #[error("Database schema has changed unexpectedly")]
    SchemaChanged,

    #[error("Insufficient permissions")]
    PermissionDenied,

    #[error("Key contains characters not allowed in a file name: {0}")]
    InvalidKey(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error), // Used as fallback
}
