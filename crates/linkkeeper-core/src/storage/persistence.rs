//! Collection blob persistence
//!
//! Saves and loads the JSON collection blob to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent
//! corruption.
//!
//! Storage location: `~/.local/share/linkkeeper/links.json`
//! (configurable via `Config`).

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the collection blob
///
/// Provides atomic file operations for saving/loading the blob.
pub struct JsonPersistence {
    config: Config,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a blob exists on disk
    pub fn exists(&self) -> bool {
        self.config.data_path().exists()
    }

    /// Load the raw blob from disk
    ///
    /// Returns `None` if no blob has been written yet. Returns an error
    /// if the file exists but can't be read; whether its *content* is
    /// usable is the caller's concern.
    pub fn load(&self) -> StorageResult<Option<String>> {
        let path = self.config.data_path();

        if !path.exists() {
            return Ok(None);
        }

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) => Err(StorageError::ReadError { path, source }),
        }
    }

    /// Save the blob to disk using an atomic write
    pub fn save(&self, raw: &str) -> StorageResult<()> {
        atomic_write(&self.config.data_path(), raw.as_bytes())
    }

    /// Delete the stored blob
    pub fn delete_all(&self) -> StorageResult<()> {
        let path = self.config.data_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|err| StorageError::from_io(err, path))?;
        }
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
