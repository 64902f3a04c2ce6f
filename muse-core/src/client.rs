//! Completion function clients
//!
//! [`CompletionClient`] is the seam between the console and the remote AI
//! completion function: the console calls it exactly once per submission and
//! never sees transport or auth details. [`HttpCompletionClient`] is the
//! implementation the binary uses; tests substitute scripted ones.

use crate::config::Config;
use crate::error::InvokeError;
use crate::http::get_client;
use crate::models::{CompletionPayload, FunctionReply};
use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

/// Boundary trait implemented by completion function clients
///
/// `request_id` identifies the submission in logs and request headers; the
/// console generates a fresh one per attempt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Deliver one payload to the completion function and decode its reply
    /// envelope. A returned error means no envelope exists at all; a reply
    /// with `success == false` is a normal return, not an error.
    async fn invoke_completion(
        &self,
        payload: &CompletionPayload,
        request_id: Uuid,
    ) -> Result<FunctionReply, InvokeError>;
}

/// Client that POSTs payloads to the configured completion function
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    config: Config,
}

impl HttpCompletionClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn invoke_completion(
        &self,
        payload: &CompletionPayload,
        request_id: Uuid,
    ) -> Result<FunctionReply, InvokeError> {
        let client = get_client();

        let response = client
            .post(self.config.function_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.public_key))
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Request-Id", request_id.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| InvokeError::transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                request_id = %request_id,
                "completion function HTTP error"
            );
            return Err(InvokeError::response(format!(
                "completion function returned {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| InvokeError::response(format!("undecodable reply envelope: {}", e)))
    }
}
