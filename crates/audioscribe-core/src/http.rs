//! Shared HTTP client for gateway calls.
//!
//! All gateways go through one pooled `reqwest::Client`. The client carries the
//! only timeout in the crate; gateways themselves impose none.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

/// Default request timeout for gateway calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the process-wide HTTP client, building it on first use.
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")
    })
}
