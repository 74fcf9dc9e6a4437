use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NoteStorage, StateCell, StorageError};

/// A completed note.
///
/// Immutable once inserted into the collection; the in-progress working copy
/// is [`super::NoteDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub transcript: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        title: impl Into<String>,
        transcript: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            transcript: transcript.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// The durable, insertion-ordered list of completed notes.
///
/// Every update is persisted; a save failure is logged and the in-memory
/// state stays authoritative for the rest of the session.
pub struct NoteCollection {
    cell: StateCell<Vec<Note>>,
    storage: NoteStorage,
}

impl NoteCollection {
    /// Load the collection from storage.
    pub fn load(storage: NoteStorage) -> Result<Self, StorageError> {
        let notes = storage.load()?;
        Ok(Self {
            cell: StateCell::new(notes),
            storage,
        })
    }

    /// Snapshot of the collection, oldest first
    pub fn read(&self) -> Vec<Note> {
        self.cell.read()
    }

    /// Atomically replace the collection with `f(current)` and persist it.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Vec<Note>) -> Vec<Note>,
    {
        self.cell.update(f);
        if let Err(e) = self.storage.save(&self.cell.read()) {
            crate::warn!("Failed to persist notes: {e}");
        }
    }
}
