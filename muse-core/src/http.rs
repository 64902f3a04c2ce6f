//! Shared HTTP client utilities
//!
//! This module provides a shared, lazily-initialized HTTP client for calls to
//! the completion function. Using a single client allows connection pooling
//! and avoids resource duplication.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// HTTP timeout for completion requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Global HTTP client for completion function calls (60s timeout)
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client
///
/// This client has a 60-second timeout, which covers the slowest
/// completions the function is allowed to produce.
pub fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent("muse-rs/1.0")
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}
