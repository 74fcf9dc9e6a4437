//! Session composition root.
//!
//! Owns the transient pipeline state (tracker, draft) and the durable note
//! collection. There is no ambient global: callers receive the cells from
//! here and drive them through `read`/`update`/`reset`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::{NoteCollection, NoteDraft, NoteSteps, NoteStorage, StateCell, StorageError};

pub struct NoteSession {
    steps: StateCell<NoteSteps>,
    draft: StateCell<NoteDraft>,
    notes: NoteCollection,
    epoch: AtomicU64,
}

impl NoteSession {
    /// Load a session: the collection comes from storage, the tracker and
    /// draft always start from defaults.
    pub fn load(storage: NoteStorage) -> Result<Self, StorageError> {
        Ok(Self {
            steps: StateCell::default(),
            draft: StateCell::default(),
            notes: NoteCollection::load(storage)?,
            epoch: AtomicU64::new(0),
        })
    }

    /// Progress tracker for the note being created
    pub fn steps(&self) -> &StateCell<NoteSteps> {
        &self.steps
    }

    /// Working copy of the note being created
    pub fn draft(&self) -> &StateCell<NoteDraft> {
        &self.draft
    }

    /// The durable note collection
    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    /// Current pipeline generation; advances on every reset.
    ///
    /// In-flight work captures this at start and drops its write-backs when
    /// the value has moved on (there is no way to cancel an issued gateway
    /// call, only to ignore its completion).
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Abandon the in-progress note: clear the tracker and draft and advance
    /// the epoch. The collection is untouched.
    pub fn reset_pipeline(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.steps.reset();
        self.draft.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Note;

    #[test]
    fn only_the_collection_survives_reload() {
        let dir = tempfile::tempdir().unwrap();

        {
            let session = NoteSession::load(NoteStorage::new(dir.path())).unwrap();
            session.steps().update(|mut s| {
                s.recorded = true;
                s.transcript = Some("words".to_string());
                s
            });
            session.draft().update(|mut d| {
                d.title = Some("Draft title".to_string());
                d
            });
            session.notes().update(|mut notes| {
                notes.push(Note::new("Kept", "transcript", "content"));
                notes
            });
        }

        let reloaded = NoteSession::load(NoteStorage::new(dir.path())).unwrap();
        assert_eq!(reloaded.steps().read(), NoteSteps::default());
        assert_eq!(reloaded.draft().read(), NoteDraft::default());
        let notes = reloaded.notes().read();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Kept");
    }

    #[test]
    fn reset_clears_transient_state_and_advances_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let session = NoteSession::load(NoteStorage::new(dir.path())).unwrap();

        session.steps().update(|mut s| {
            s.error = Some("boom".to_string());
            s
        });
        session.draft().update(|mut d| {
            d.content = Some("partial".to_string());
            d
        });
        let epoch_before = session.epoch();

        session.reset_pipeline();

        assert_eq!(session.steps().read(), NoteSteps::default());
        assert_eq!(session.draft().read(), NoteDraft::default());
        assert_eq!(session.epoch(), epoch_before + 1);
    }
}
