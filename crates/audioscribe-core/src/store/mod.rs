//! Session state containers and the durable note collection.
//!
//! State is held in explicit, injectable cells owned by the composition root
//! (`NoteSession`), not in a process-wide global. Only the note collection is
//! durable; the tracker and draft live and die with the session.

mod draft;
mod notes;
mod steps;
mod storage;

pub use draft::NoteDraft;
pub use notes::{Note, NoteCollection};
pub use steps::NoteSteps;
pub use storage::{NoteStorage, STORAGE_NAME, StorageError};

use std::sync::Mutex;

/// A mutex-guarded state record with replace-by-transformation updates.
///
/// `update(fn)` applies a pure transformation to the record as it is at
/// application time, never to a stale captured snapshot, so partial updates
/// from independent call sites cannot lose each other's writes. Two racing
/// updates are last-write-wins at full-record granularity.
pub struct StateCell<T> {
    inner: Mutex<T>,
}

impl<T: Clone + Default> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Snapshot of the current record
    pub fn read(&self) -> T {
        self.inner.lock().unwrap().clone()
    }

    /// Atomically replace the record with `f(current)`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let mut guard = self.inner.lock().unwrap();
        let current = std::mem::take(&mut *guard);
        *guard = f(current);
    }

    /// Return the record to its initial value.
    pub fn reset(&self) {
        *self.inner.lock().unwrap() = T::default();
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_transformation_to_current_state() {
        let cell = StateCell::new(NoteSteps::default());
        let before = cell.read();

        cell.update(|mut steps| {
            steps.recorded = true;
            steps
        });

        let expected = {
            let mut steps = before;
            steps.recorded = true;
            steps
        };
        assert_eq!(cell.read(), expected);
    }

    #[test]
    fn sequential_updates_compose() {
        let cell = StateCell::new(NoteSteps::default());

        cell.update(|mut steps| {
            steps.recorded = true;
            steps
        });
        cell.update(|mut steps| {
            steps.upload_started = true;
            steps.uploaded_url = Some("https://example.com/a.mp3".to_string());
            steps
        });

        // g(f(s)): both transformations are visible
        let steps = cell.read();
        assert!(steps.recorded);
        assert!(steps.upload_started);
        assert_eq!(
            steps.uploaded_url.as_deref(),
            Some("https://example.com/a.mp3")
        );
    }

    #[test]
    fn marking_recorded_leaves_other_fields_at_defaults() {
        let cell = StateCell::new(NoteSteps::default());

        cell.update(|mut steps| {
            steps.recorded = true;
            steps
        });

        let steps = cell.read();
        assert!(steps.recorded);
        assert!(!steps.upload_started);
        assert_eq!(steps.uploaded_url, None);
        assert!(!steps.transcript_started);
        assert_eq!(steps.transcript, None);
        assert!(!steps.generation_started);
        assert!(!steps.streaming_started);
        assert!(!steps.streaming_finished);
        assert_eq!(steps.error, None);
    }

    #[test]
    fn reset_restores_defaults_from_any_state() {
        let cell = StateCell::new(NoteSteps::default());
        cell.update(|mut steps| {
            steps.recorded = true;
            steps.upload_started = true;
            steps.uploaded_url = Some("https://example.com/a.mp3".to_string());
            steps.transcript_started = true;
            steps.transcript = Some("words".to_string());
            steps.generation_started = true;
            steps.streaming_started = true;
            steps.streaming_finished = true;
            steps.error = Some("boom".to_string());
            steps
        });

        cell.reset();
        assert_eq!(cell.read(), NoteSteps::default());

        // Idempotent
        cell.reset();
        assert_eq!(cell.read(), NoteSteps::default());
    }

    #[test]
    fn error_does_not_clear_in_flight_flags() {
        let cell = StateCell::new(NoteSteps::default());
        cell.update(|mut steps| {
            steps.recorded = true;
            steps.transcript_started = true;
            steps
        });

        cell.update(|mut steps| {
            steps.error = Some("transcription failed".to_string());
            steps
        });

        let steps = cell.read();
        assert!(steps.halted());
        assert!(steps.recorded);
        assert!(steps.transcript_started);
    }

    #[test]
    fn draft_cell_has_independent_lifecycle() {
        let steps = StateCell::new(NoteSteps::default());
        let draft = StateCell::new(NoteDraft::default());

        draft.update(|mut d| {
            d.transcript = Some("hello".to_string());
            d
        });
        steps.reset();

        assert_eq!(draft.read().transcript.as_deref(), Some("hello"));
    }
}
