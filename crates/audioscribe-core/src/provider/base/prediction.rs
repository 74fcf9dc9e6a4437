//! Shared call for prediction-style speech APIs.
//!
//! Both transcription backends run as hosted models behind the same prediction
//! endpoint:
//! - POST `{base}/v1/predictions` with a model version and an `input` object
//! - Authorization via `Bearer` token
//! - `Prefer: wait` so the response carries the finished `output` instead of a
//!   polling handle
//!
//! The shape of `output` is backend-specific; callers deserialize it themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// Hosted model endpoint used when no override is given
pub(crate) const DEFAULT_PREDICTION_BASE_URL: &str = "https://api.replicate.com";

#[derive(Deserialize)]
struct PredictionResponse {
    output: Value,
}

/// Run one prediction and return its raw `output` value.
pub(crate) async fn run_prediction(
    client: &reqwest::Client,
    base_url: &str,
    api_token: &str,
    version: &str,
    input: Value,
) -> Result<Value> {
    let url = format!("{}/v1/predictions", base_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_token}"))
        .header("Prefer", "wait")
        .json(&serde_json::json!({
            "version": version,
            "input": input,
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

    let text = response
        .text()
        .await
        .context("Failed to get response text")?;
    let resp: PredictionResponse =
        serde_json::from_str(&text).context("Failed to parse API response")?;

    Ok(resp.output)
}
