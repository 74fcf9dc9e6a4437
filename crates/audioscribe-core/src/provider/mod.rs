//! Speech-to-text backends and the transcription gateway.
//!
//! A backend maps a publicly reachable audio URL to transcript text. Two
//! variants are supported (a fast batched model and a reference model); each
//! adapter normalizes its own response shape so nothing backend-specific
//! leaks past this module. The [`TranscriptionGateway`] wraps a backend and
//! converts its result into a tagged success/failure outcome that never
//! propagates an error to the caller.

mod base;
mod fast_whisper;
mod reference_whisper;

pub use fast_whisper::FastWhisperBackend;
pub use reference_whisper::ReferenceWhisperBackend;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::config::SpeechBackendKind;
use crate::http::get_http_client;

/// Fallback label when a provider failure carries no message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A speech-to-text backend: resolves an audio URL to transcript text.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Machine-readable backend identifier
    fn name(&self) -> &'static str;

    /// Human-readable backend name
    fn display_name(&self) -> &'static str;

    /// Transcribe the audio at `audio_url`, returning plain text.
    async fn transcribe(
        &self,
        client: &reqwest::Client,
        api_token: &str,
        audio_url: &str,
    ) -> Result<String>;
}

/// Registry of the available backends, keyed by [`SpeechBackendKind`].
pub struct BackendRegistry {
    backends: Vec<(SpeechBackendKind, Arc<dyn SpeechBackend>)>,
}

impl BackendRegistry {
    fn standard() -> Self {
        Self {
            backends: vec![
                (
                    SpeechBackendKind::FastWhisper,
                    Arc::new(FastWhisperBackend::new()) as Arc<dyn SpeechBackend>,
                ),
                (
                    SpeechBackendKind::ReferenceWhisper,
                    Arc::new(ReferenceWhisperBackend::new()) as Arc<dyn SpeechBackend>,
                ),
            ],
        }
    }

    /// Look up a backend by kind
    pub fn get(&self, kind: &SpeechBackendKind) -> Result<Arc<dyn SpeechBackend>> {
        self.backends
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, backend)| Arc::clone(backend))
            .ok_or_else(|| anyhow!("No backend registered for '{kind}'"))
    }
}

static REGISTRY: Lazy<BackendRegistry> = Lazy::new(BackendRegistry::standard);

/// The process-wide backend registry
pub fn registry() -> &'static BackendRegistry {
    &REGISTRY
}

/// Result of a transcription gateway call.
///
/// `success: true` always comes with `text`; `success: false` always comes
/// with a non-empty `error` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionOutcome {
    pub success: bool,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl TranscriptionOutcome {
    fn ok(text: String) -> Self {
        Self {
            success: true,
            text: Some(text),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        let message = if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        };
        Self {
            success: false,
            text: None,
            error: Some(message),
        }
    }
}

/// Gateway normalizing one backend's transcription call into a tagged outcome.
pub struct TranscriptionGateway {
    backend: Arc<dyn SpeechBackend>,
    api_token: String,
}

impl TranscriptionGateway {
    /// Build a gateway over a registered backend kind
    pub fn new(kind: &SpeechBackendKind, api_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            backend: registry().get(kind)?,
            api_token: api_token.into(),
        })
    }

    /// Build a gateway over an explicit backend instance
    pub fn with_backend(backend: Arc<dyn SpeechBackend>, api_token: impl Into<String>) -> Self {
        Self {
            backend,
            api_token: api_token.into(),
        }
    }

    /// Transcribe the audio at `audio_url`.
    ///
    /// Never returns an error: transport and provider failures are caught and
    /// reported in the outcome's `error` field.
    pub async fn transcribe(&self, audio_url: &str) -> TranscriptionOutcome {
        let client = match get_http_client() {
            Ok(client) => client,
            Err(e) => return TranscriptionOutcome::failed(format!("{e:#}")),
        };

        match self
            .backend
            .transcribe(client, &self.api_token, audio_url)
            .await
        {
            Ok(text) => TranscriptionOutcome::ok(text),
            Err(e) => {
                crate::warn!("Transcription ({}): {e:#}", self.backend.name());
                TranscriptionOutcome::failed(format!("{e:#}"))
            }
        }
    }
}
