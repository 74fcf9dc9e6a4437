pub mod config;
pub mod contact;
pub mod generation;
pub mod http;
pub mod markdown;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod store;
pub mod verbose;

pub use config::{
    CONTACT_API_KEY_ENV, GENERATION_API_KEY_ENV, SPEECH_API_TOKEN_ENV, SpeechBackendKind,
};
pub use contact::{ContactGateway, ContactOutcome};
pub use generation::{DEFAULT_GENERATION_PROMPT, GenerationGateway, GenerationOutcome};
pub use http::{DEFAULT_TIMEOUT_SECS, get_http_client};
pub use markdown::{MarkdownRenderer, NodeKind, RenderRegistry, RenderRule};
pub use pipeline::run_pipeline;
pub use provider::{
    FastWhisperBackend, ReferenceWhisperBackend, SpeechBackend, TranscriptionGateway,
    TranscriptionOutcome, registry,
};
pub use session::NoteSession;
pub use store::{
    Note, NoteCollection, NoteDraft, NoteSteps, NoteStorage, STORAGE_NAME, StateCell, StorageError,
};
pub use verbose::set_verbose;
