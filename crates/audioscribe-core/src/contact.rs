//! Contact-list signup gateway.
//!
//! Registers an email address with the mailing-list provider under a fixed
//! source tag. A non-2xx provider response counts as failure; the provider
//! reports validation problems (bad address, duplicate contact) through
//! status codes, not through a thrown error.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::http::get_http_client;

const DEFAULT_CONTACT_BASE_URL: &str = "https://app.loops.so";

/// Source tag sent with every signup
const CONTACT_SOURCE_TAG: &str = "audioscribe";

/// Result of a contact signup call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactOutcome {
    pub success: bool,
    pub error: Option<String>,
}

/// Gateway for the mailing-list provider.
pub struct ContactGateway {
    base_url: String,
    api_key: String,
}

impl ContactGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_CONTACT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the gateway at a different provider host (test or proxy)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Register an email address with the mailing list.
    ///
    /// Never returns an error: transport failures and rejected requests are
    /// reported in the outcome's `error` field.
    pub async fn register(&self, email: &str) -> ContactOutcome {
        match self.register_inner(email).await {
            Ok(()) => ContactOutcome {
                success: true,
                error: None,
            },
            Err(e) => {
                crate::warn!("Contact signup: {e:#}");
                ContactOutcome {
                    success: false,
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }

    async fn register_inner(&self, email: &str) -> Result<()> {
        let client = get_http_client()?;
        let url = format!(
            "{}/api/v1/contacts/create",
            self.base_url.trim_end_matches('/')
        );

        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "email": email,
                "source": CONTACT_SOURCE_TAG,
                "subscribed": true,
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

        Ok(())
    }
}
