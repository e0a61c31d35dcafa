use super::{BackendError, KeyValueStore, NoteError, Result};
use log::trace;
use rusqlite::{Connection, Error as SqliteError, ErrorCode, OptionalExtension, params};

/// Stores values in a single `kv` table
#[derive(Debug)]
pub struct SqliteBackend {
    connection: Connection,
}

impl SqliteBackend {
    /// Creates a new `SqliteBackend` by opening the `SQLite` database at the given path.
    /// Also ensures that the `kv` table exists.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::DatabaseOpenError` if the database file cannot be opened
    /// - `BackendError::TableCreationError` if the `kv` table cannot be created
    pub fn new(path: &str) -> Result<Self> {
        let connection = Connection::open(path).map_err(|e| {
            NoteError::Backend(BackendError::DatabaseOpenError(format!("'{path}': {e}")))
        })?;
        Self::with_connection(connection)
    }

    /// Creates a `SqliteBackend` backed by a private in-memory database
    ///
    /// # Errors
    ///
    /// Same as [`SqliteBackend::new`]
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()
            .map_err(|e| NoteError::Backend(BackendError::DatabaseOpenError(e.to_string())))?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "
                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )
                ",
                [],
            )
            .map_err(|_| NoteError::Backend(BackendError::TableCreationError))?;
        trace!("Ensured `kv` table exists");
        Ok(Self { connection })
    }
}

/// Maps a `rusqlite::Error` into a `NoteError`, wrapping known SQLite-specific codes into domain-specific variants.
///
/// This function is used internally by all database operations.
///
/// # Errors
///
/// Always returns a `NoteError::Backend` variant. Specific known `SQLite` error codes
/// are converted to more descriptive errors; all others are wrapped in `BackendError::Other`.
fn map_sqlite_error(e: SqliteError) -> NoteError {
    match e {
        SqliteError::SqliteFailure(code, _) => match code.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                NoteError::Backend(BackendError::DatabaseBusy)
            }
            ErrorCode::PermissionDenied | ErrorCode::ReadOnly => {
                NoteError::Backend(BackendError::PermissionDenied)
            }
            ErrorCode::NotADatabase => NoteError::Backend(BackendError::NotADatabase),
            ErrorCode::SchemaChanged => NoteError::Backend(BackendError::SchemaChanged),
            _ => NoteError::Backend(BackendError::Other(anyhow::anyhow!(
                "SQLite error: {:?}",
                code
            ))),
        },
        other => NoteError::Backend(BackendError::Other(anyhow::Error::new(other))),
    }
}

impl KeyValueStore for SqliteBackend {
    /// Reads the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns mapped `SQLite` errors if the query fails
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sqlite_error)
    }

    /// Inserts or replaces the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::DatabaseBusy`, `PermissionDenied`, `NotADatabase`, or other mapped SQLite-specific errors.
    /// - `BackendError::Other` if an unknown `SQLite` error occurs.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(map_sqlite_error)?;
        trace!("Stored {} byte(s) under '{key}'", value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert_eq!(backend.get("notes").unwrap(), None);

        backend.set("notes", "[1]").unwrap();
        backend.set("notes", "[]").unwrap();
        backend.set("other", "x").unwrap();

        assert_eq!(backend.get("notes").unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn value_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");
        let path = path.to_str().unwrap();

        SqliteBackend::new(path).unwrap().set("notes", "[]").unwrap();
        let reopened = SqliteBackend::new(path).unwrap();
        assert_eq!(reopened.get("notes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn non_database_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![0xAB_u8; 4096]).unwrap();

        assert!(SqliteBackend::new(path.to_str().unwrap()).is_err());
    }
}
