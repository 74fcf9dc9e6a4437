//! Fast batched whisper backend.
//!
//! Runs a throughput-tuned whisper variant that transcribes in large batches
//! and reports chunk-level timestamps. The response nests the transcript both
//! as a single `text` field and as timestamped chunks; this adapter returns
//! the flat text and falls back to joining chunks when a model revision omits
//! it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::SpeechBackend;
use super::base::{DEFAULT_PREDICTION_BASE_URL, run_prediction};

const MODEL_VERSION: &str =
    "vaibhavs10/incredibly-fast-whisper:3ab86df6c8f54c11309d4d1f930ac292bad43ace52d10c80d87eb258b3c9f79c";

/// Samples decoded per forward pass
const BATCH_SIZE: u32 = 24;

#[derive(Debug, Deserialize)]
struct FastWhisperOutput {
    text: String,
    #[serde(default)]
    chunks: Vec<FastWhisperChunk>,
}

#[derive(Debug, Deserialize)]
struct FastWhisperChunk {
    timestamp: (f64, f64),
    text: String,
}

/// Fast batched whisper transcription backend
#[derive(Debug, Clone)]
pub struct FastWhisperBackend {
    base_url: String,
}

impl FastWhisperBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the backend at a different prediction host (self-hosted or test)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for FastWhisperBackend {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PREDICTION_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl SpeechBackend for FastWhisperBackend {
    fn name(&self) -> &'static str {
        "fast-whisper"
    }

    fn display_name(&self) -> &'static str {
        "Fast Whisper"
    }

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        api_token: &str,
        audio_url: &str,
    ) -> Result<String> {
        let input = serde_json::json!({
            "audio": audio_url,
            "batch_size": BATCH_SIZE,
            "task": "transcribe",
            "timestamp": "chunk",
        });

        let output = run_prediction(client, &self.base_url, api_token, MODEL_VERSION, input).await?;
        let parsed: FastWhisperOutput =
            serde_json::from_value(output).context("Failed to parse fast-whisper output")?;

        Ok(normalize(parsed))
    }
}

fn normalize(output: FastWhisperOutput) -> String {
    if !output.text.trim().is_empty() {
        return output.text;
    }

    // Some model revisions return only the chunked segments
    let mut chunks = output.chunks;
    chunks.sort_by(|a, b| {
        a.timestamp
            .0
            .partial_cmp(&b.timestamp.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    chunks
        .iter()
        .map(|c| c.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
