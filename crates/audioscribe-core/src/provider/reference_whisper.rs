//! Reference whisper backend.
//!
//! Runs the reference large-v3 whisper model with explicit decoding controls.
//! Depending on the requested output mode the model returns either an object
//! with a `transcription` string, a segment array, or bare text; all three are
//! normalized to plain text here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::SpeechBackend;
use super::base::{DEFAULT_PREDICTION_BASE_URL, run_prediction};

const MODEL_VERSION: &str =
    "openai/whisper:4d50797290df275329f202e48c76360b3f22b08d28c196cbc54600319435f8d2";

const MODEL_NAME: &str = "large-v3";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReferenceWhisperOutput {
    Object { transcription: String },
    Segments(Vec<ReferenceWhisperSegment>),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ReferenceWhisperSegment {
    text: String,
}

/// Reference whisper transcription backend
#[derive(Debug, Clone)]
pub struct ReferenceWhisperBackend {
    base_url: String,
}

impl ReferenceWhisperBackend {
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

impl Default for ReferenceWhisperBackend {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PREDICTION_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl SpeechBackend for ReferenceWhisperBackend {
    fn name(&self) -> &'static str {
        "reference-whisper"
    }

    fn display_name(&self) -> &'static str {
        "Reference Whisper"
    }

    async fn transcribe(
        &self,
        client: &reqwest::Client,
        api_token: &str,
        audio_url: &str,
    ) -> Result<String> {
        let input = serde_json::json!({
            "audio": audio_url,
            "model": MODEL_NAME,
            "translate": false,
            "temperature": 0,
            "transcription": "plain text",
            "suppress_tokens": "-1",
            "logprob_threshold": -1,
            "no_speech_threshold": 0.6,
            "condition_on_previous_text": true,
            "compression_ratio_threshold": 2.4,
            "temperature_increment_on_fallback": 0.2,
        });

        let output = run_prediction(client, &self.base_url, api_token, MODEL_VERSION, input).await?;
        let parsed: ReferenceWhisperOutput =
            serde_json::from_value(output).context("Failed to parse reference-whisper output")?;

        Ok(normalize(parsed))
    }
}

fn normalize(output: ReferenceWhisperOutput) -> String {
    match output {
        ReferenceWhisperOutput::Object { transcription } => transcription,
        ReferenceWhisperOutput::Segments(segments) => segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        ReferenceWhisperOutput::Text(text) => text,
    }
}
