use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the bearer token for the speech provider.
///
/// Both transcription backends run on the same provider, so they share a token.
pub const SPEECH_API_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";

/// Environment variable holding the bearer key for the mailing-list provider.
pub const CONTACT_API_KEY_ENV: &str = "LOOPS_API_KEY";

/// Environment variable holding the bearer key for the note generation provider.
pub const GENERATION_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Available transcription backends
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub enum SpeechBackendKind {
    /// Batched whisper variant tuned for throughput
    #[default]
    #[serde(rename = "fast-whisper")]
    FastWhisper,
    /// Reference whisper model with full decoding controls
    #[serde(rename = "reference-whisper")]
    ReferenceWhisper,
}

impl SpeechBackendKind {
    /// Get the string identifier for this backend
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechBackendKind::FastWhisper => "fast-whisper",
            SpeechBackendKind::ReferenceWhisper => "reference-whisper",
        }
    }

    /// Get the environment variable name for this backend's API token
    pub fn api_key_env_var(&self) -> &'static str {
        SPEECH_API_TOKEN_ENV
    }

    /// Read this backend's API token from the environment
    pub fn api_token_from_env(&self) -> Option<String> {
        std::env::var(self.api_key_env_var()).ok()
    }

    /// List all available backends
    pub fn all() -> &'static [SpeechBackendKind] {
        &[
            SpeechBackendKind::FastWhisper,
            SpeechBackendKind::ReferenceWhisper,
        ]
    }

    /// Human-readable display name for this backend
    pub fn display_name(&self) -> &'static str {
        match self {
            SpeechBackendKind::FastWhisper => "Fast Whisper",
            SpeechBackendKind::ReferenceWhisper => "Reference Whisper",
        }
    }
}

impl fmt::Display for SpeechBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeechBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast-whisper" | "fastwhisper" | "fast" => Ok(SpeechBackendKind::FastWhisper),
            "reference-whisper" | "referencewhisper" | "reference" => {
                Ok(SpeechBackendKind::ReferenceWhisper)
            }
            _ => Err(format!(
                "Unknown backend: {}. Available: fast-whisper, reference-whisper",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_round_trips_through_strings() {
        for kind in SpeechBackendKind::all() {
            let parsed: SpeechBackendKind = kind.as_str().parse().unwrap();
            assert_eq!(&parsed, kind);
        }
    }

    #[test]
    fn unknown_backend_name_is_rejected() {
        assert!("deepgram".parse::<SpeechBackendKind>().is_err());
    }
}
