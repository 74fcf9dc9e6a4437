//! Durable persistence for the note collection.
//!
//! One JSON document under a fixed storage name holds the collection and
//! nothing else. The tracker and draft are deliberately outside this boundary;
//! a reloaded session always starts them from defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Note;

/// Fixed name of the durable storage record
pub const STORAGE_NAME: &str = "audioscribe-storage";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// On-disk document shape: the collection only
#[derive(Serialize, Deserialize)]
struct StoredState {
    notes: Vec<Note>,
}

/// File-backed storage for the note collection.
#[derive(Debug, Clone)]
pub struct NoteStorage {
    dir: PathBuf,
}

impl NoteStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default storage directory under the platform config dir
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("audioscribe")
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_NAME}.json"))
    }

    /// Load the stored collection; a missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Note>, StorageError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path)?;
        let state: StoredState = serde_json::from_str(&raw)?;
        Ok(state.notes)
    }

    /// Replace the stored collection.
    pub fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let state = StoredState {
            notes: notes.to_vec(),
        };
        let raw = serde_json::to_string_pretty(&state)?;

        // Write to a temp file first, then rename into place
        let path = self.file_path();
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, raw)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

impl Default for NoteStorage {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let storage = NoteStorage::new(dir.path());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn saved_notes_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let storage = NoteStorage::new(dir.path());

        let notes = vec![Note::new("Title", "transcript", "# content")];
        storage.save(&notes).unwrap();

        assert_eq!(storage.load().unwrap(), notes);
    }

    #[test]
    fn corrupt_document_surfaces_a_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = NoteStorage::new(dir.path());
        fs::write(dir.path().join(format!("{STORAGE_NAME}.json")), "not json").unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Serde(_))));
    }
}
