//! Note generation from transcripts.
//!
//! Sends a transcript to an LLM and turns it into a titled markdown note. The
//! model is asked to reply with a short title on the first line and the note
//! body after it; the body is streamed back incrementally so the UI can render
//! partial content while generation runs.
//!
//! Like the other gateways, [`GenerationGateway::generate`] never propagates an
//! error to the caller: every path ends in a tagged [`GenerationOutcome`].

use anyhow::{Context, Result};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::http::get_http_client;

const DEFAULT_GENERATION_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_GENERATION_PROMPT: &str = "Turn this voice transcript into organized notes. \
Reply with a short title on the first line, then the notes as markdown. \
Use headings, lists and bold for key points. \
Output only the title and the notes, no explanations.";

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Result of a note generation call.
///
/// `success: true` always comes with `title` and `content`; `success: false`
/// always comes with a non-empty `error` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub success: bool,
    pub title: Option<String>,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl GenerationOutcome {
    fn ok(title: String, content: String) -> Self {
        Self {
            success: true,
            title: Some(title),
            content: Some(content),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        let message = if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        Self {
            success: false,
            title: None,
            content: None,
            error: Some(message),
        }
    }
}

/// Gateway for the note generation provider.
pub struct GenerationGateway {
    base_url: String,
    api_key: String,
    model: String,
    prompt: String,
}

impl GenerationGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_GENERATION_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_GENERATION_MODEL.to_string(),
            prompt: DEFAULT_GENERATION_PROMPT.to_string(),
        }
    }

    /// Point the gateway at a different provider host (test or proxy)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a custom system prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Generate a titled markdown note from a transcript.
    ///
    /// Body fragments are forwarded over `deltas` as they stream in (the title
    /// line is withheld); the finished title and content are returned in the
    /// outcome once the stream ends.
    pub async fn generate(
        &self,
        transcript: &str,
        deltas: Option<UnboundedSender<String>>,
    ) -> GenerationOutcome {
        match self.generate_inner(transcript, deltas).await {
            Ok((title, content)) => GenerationOutcome::ok(title, content),
            Err(e) => {
                crate::warn!("Generation: {e:#}");
                GenerationOutcome::failed(format!("{e:#}"))
            }
        }
    }

    async fn generate_inner(
        &self,
        transcript: &str,
        deltas: Option<UnboundedSender<String>>,
    ) -> Result<(String, String)> {
        let client = get_http_client()?;
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": self.prompt},
                    {"role": "user", "content": transcript}
                ],
                "stream": true
            }))
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("API error ({status}): {error_text}");
        }

        let mut stream = response.bytes_stream();
        let mut pending = String::new();
        let mut full = String::new();
        let mut title_seen = false;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Failed to read response stream")?;
            pending.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = pending.find('\n') {
                let line = pending[..pos].trim().to_string();
                pending.drain(..=pos);

                let Some(data) = line.strip_prefix("data:") else {
                    continue;
                };
                let data = data.trim();
                if data.is_empty() || data == "[DONE]" {
                    continue;
                }

                let parsed: StreamChunk = match serde_json::from_str(data) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        crate::verbose!("Skipping malformed stream event: {e}");
                        continue;
                    }
                };

                for choice in parsed.choices {
                    let Some(delta) = choice.delta.content else {
                        continue;
                    };
                    full.push_str(&delta);

                    let Some(tx) = deltas.as_ref() else {
                        continue;
                    };
                    if title_seen {
                        // Receiver may already be gone; generation still completes
                        let _ = tx.send(delta.clone());
                    } else if let Some(idx) = full.find('\n') {
                        title_seen = true;
                        let body_start = full[idx + 1..].to_string();
                        if !body_start.is_empty() {
                            let _ = tx.send(body_start);
                        }
                    }
                }
            }
        }

        split_note(&full)
    }
}

/// Split raw model output into (title, markdown content).
fn split_note(full: &str) -> Result<(String, String)> {
    let full = full.trim();
    if full.is_empty() {
        anyhow::bail!("Provider returned no content");
    }

    match full.split_once('\n') {
        Some((title, content)) => Ok((title.trim().to_string(), content.trim().to_string())),
        // Single-line reply: treat the whole thing as an untitled note body
        None => Ok(("Untitled note".to_string(), full.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn sse_body(fragments: &[&str]) -> String {
        let mut body = String::new();
        for fragment in fragments {
            let event = serde_json::json!({
                "choices": [{"delta": {"content": fragment}}]
            });
            body.push_str(&format!("data: {event}\n\n"));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[tokio::test]
    async fn first_line_becomes_title_rest_becomes_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(sse_body(&[
                "Meeting notes\n",
                "## Decisions\n",
                "- ship on **Friday**",
            ]))
            .create_async()
            .await;

        let gateway = GenerationGateway::new("test-key").with_base_url(server.url());
        let outcome = gateway.generate("we decided to ship on friday", None).await;

        assert!(outcome.success);
        assert_eq!(outcome.title.as_deref(), Some("Meeting notes"));
        assert_eq!(
            outcome.content.as_deref(),
            Some("## Decisions\n- ship on **Friday**")
        );
    }

    #[tokio::test]
    async fn streamed_fragments_arrive_in_order_and_sum_to_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(sse_body(&["Title\n", "- first", "\n- second"]))
            .create_async()
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let gateway = GenerationGateway::new("test-key").with_base_url(server.url());
        let outcome = gateway.generate("transcript", Some(tx)).await;

        let mut streamed = String::new();
        while let Some(fragment) = rx.recv().await {
            streamed.push_str(&fragment);
        }

        assert!(outcome.success);
        assert_eq!(streamed, "- first\n- second");
        assert_eq!(outcome.content.as_deref(), Some(streamed.as_str()));
    }

    #[tokio::test]
    async fn provider_error_becomes_failed_outcome() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let gateway = GenerationGateway::new("test-key").with_base_url(server.url());
        let outcome = gateway.generate("transcript", None).await;

        assert!(!outcome.success);
        assert_eq!(outcome.title, None);
        assert_eq!(outcome.content, None);
        assert!(outcome.error.unwrap().contains("429"));
    }

    #[tokio::test]
    async fn empty_stream_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("data: [DONE]\n\n")
            .create_async()
            .await;

        let gateway = GenerationGateway::new("test-key").with_base_url(server.url());
        let outcome = gateway.generate("transcript", None).await;

        assert!(!outcome.success);
        assert!(!outcome.error.unwrap().is_empty());
    }
}
