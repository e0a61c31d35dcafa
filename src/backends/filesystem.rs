use super::{BackendError, KeyValueStore, NoteError, Result};
use log::trace;
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::PathBuf,
};

/// Stores each key as `<key>.json` inside a directory
#[derive(Debug)]
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    /// Creates a new `FilesystemBackend` instance with the given base directory
    ///
    /// # Errors
    ///
    /// Returns `BackendError::DirectoryCreationError` if the base directory cannot be created
    pub fn new(path: &str) -> Result<Self> {
        let base_path = PathBuf::from(path);
        fs::create_dir_all(&base_path)
            .map_err(|e| NoteError::Backend(BackendError::DirectoryCreationError(e)))?;
        trace!("Using directory for notes: {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Constructs the file path for a key
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidKey` if the key is empty or could escape the base directory
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(NoteError::Backend(BackendError::InvalidKey(key.to_string())));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FilesystemBackend {
    /// Reads the file for `key`. A missing file means no value
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::InvalidKey` if the key is not usable as a file name
    /// - `BackendError::PermissionDenied` if the file cannot be opened due to missing privileges
    /// - `BackendError::FileReadError` for any other read failure
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                trace!("Read {} byte(s) from {}", contents.len(), path.display());
                Ok(Some(contents))
            }
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(None),
                ErrorKind::PermissionDenied => {
                    Err(NoteError::Backend(BackendError::PermissionDenied))
                }
                _ => Err(NoteError::Backend(BackendError::FileReadError(e))),
            },
        }
    }

    /// Replaces the file for `key`. The value is written to a sibling file
    /// first and renamed over the old one
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::InvalidKey` if the key is not usable as a file name
    /// - `BackendError::FileWriteError` if creating, writing or renaming the file fails
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let staging = path.with_extension("json.tmp");

        let mut file = File::create(&staging)
            .map_err(|e| NoteError::Backend(BackendError::FileWriteError(e)))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| NoteError::Backend(BackendError::FileWriteError(e)))?;
        fs::rename(&staging, &path)
            .map_err(|e| NoteError::Backend(BackendError::FileWriteError(e)))?;

        trace!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }
}
