use serde::{Deserialize, Serialize};

/// Progress record for the note currently being created.
///
/// The record only stores and reports progress; it enforces no ordering.
/// Sequencing is the caller's responsibility (see the pipeline runner), and
/// recording an `error` deliberately leaves all other fields untouched: the
/// flags describe how far the pipeline got before it halted. Only a reset
/// clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteSteps {
    /// Audio capture finished
    pub recorded: bool,
    /// Upload is in flight
    pub upload_started: bool,
    /// Public location of the uploaded audio, once known
    pub uploaded_url: Option<String>,
    /// Transcription is in flight
    pub transcript_started: bool,
    /// Transcribed text, once known
    pub transcript: Option<String>,
    /// Generation request is in flight
    pub generation_started: bool,
    /// Incremental content delivery has begun
    pub streaming_started: bool,
    /// Incremental content delivery is complete
    pub streaming_finished: bool,
    /// Last failure message; present means the pipeline is halted until reset
    pub error: Option<String>,
}

impl NoteSteps {
    /// True once a failure has been recorded
    pub fn halted(&self) -> bool {
        self.error.is_some()
    }
}
