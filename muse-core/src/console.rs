//! Prompt console state and submission flow
//!
//! [`PromptConsole`] owns the editable form, the busy phase and the last
//! response. [`PromptConsole::submit`] runs one full cycle: validate, go
//! busy, invoke the client exactly once, record the outcome, go idle.
//! Failures come back as [`ConsoleError`] and never touch the form fields.

use crate::client::CompletionClient;
use crate::error::{
    CONNECTION_FAILED_MESSAGE, ConsoleError, GENERATION_FAILED_MESSAGE, InvokeError,
};
use crate::models::{
    ChatType, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, FunctionReply, ModelId, PromptRequest,
};
use crate::presets::Preset;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Editable form state backing a submission
///
/// Holds whatever the user typed; trimming and clamping happen when a
/// [`PromptRequest`] is built from it at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptForm {
    pub prompt: String,
    pub chat_type: ChatType,
    pub model: ModelId,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for PromptForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            chat_type: ChatType::Chat,
            model: ModelId::Gpt35Turbo,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PromptForm {
    /// Build the validated request for the current field values
    pub fn request(&self) -> Result<PromptRequest, ConsoleError> {
        PromptRequest::new(
            &self.prompt,
            self.chat_type,
            self.model,
            self.max_tokens,
            self.temperature,
        )
    }
}

/// Submission phase
///
/// A console is `Busy` from the moment a request leaves until its outcome
/// is recorded; everything else is `Idle`. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
}

impl Phase {
    pub const fn is_busy(self) -> bool {
        matches!(self, Phase::Busy)
    }
}

/// The prompt console: one form, one client, at most one request in flight
///
/// Exclusive access during [`submit`](PromptConsole::submit) makes
/// overlapping submissions impossible; [`Phase`] exists so the surrounding
/// UI and the preset gate can observe the in-flight window.
pub struct PromptConsole<C> {
    client: C,
    form: PromptForm,
    phase: Phase,
    response: Option<String>,
}

impl<C: CompletionClient> PromptConsole<C> {
    /// Create an idle console with default form values
    pub fn new(client: C) -> Self {
        Self {
            client,
            form: PromptForm::default(),
            phase: Phase::Idle,
            response: None,
        }
    }

    /// Current form values
    pub fn form(&self) -> &PromptForm {
        &self.form
    }

    /// Current submission phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Last successful response, until overwritten or cleared
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.form.prompt = text.into();
    }

    pub fn set_chat_type(&mut self, chat_type: ChatType) {
        self.form.chat_type = chat_type;
    }

    pub fn set_model(&mut self, model: ModelId) {
        self.form.model = model;
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.form.max_tokens = max_tokens;
    }

    pub fn set_temperature(&mut self, temperature: f32) {
        self.form.temperature = temperature;
    }

    /// Copy a preset's text into the prompt field
    ///
    /// Returns `false` without touching the form while a submission is
    /// outstanding; the preset menu is a no-op in that window.
    pub fn apply_preset(&mut self, preset: &Preset) -> bool {
        if self.phase.is_busy() {
            return false;
        }
        self.form.prompt = preset.prompt.to_string();
        true
    }

    /// Reset the prompt text and the displayed response
    ///
    /// Always succeeds; the busy gate does not apply here. The other form
    /// fields keep their values.
    pub fn clear(&mut self) {
        self.form.prompt.clear();
        self.response = None;
    }

    /// Submit the current form once
    ///
    /// An empty prompt fails before the phase changes and the client is
    /// never invoked. Otherwise the previous response is cleared, the
    /// clamped payload goes out exactly once, and the outcome is mapped to
    /// displayed text or a user-facing error. The console is idle again by
    /// the time this returns.
    pub async fn submit(&mut self) -> Result<String, ConsoleError> {
        let request = self.form.request()?;
        let request_id = Uuid::new_v4();

        self.phase = Phase::Busy;
        self.response = None;

        info!(
            request_id = %request_id,
            chat_type = %self.form.chat_type,
            model = %self.form.model,
            max_tokens = request.max_tokens(),
            temperature = request.temperature(),
            "submitting prompt"
        );

        let payload = request.into_payload();
        let start = Instant::now();
        let outcome = self.client.invoke_completion(&payload, request_id).await;

        self.finish_submission(outcome, request_id, start.elapsed().as_millis())
    }

    /// Record one submission outcome and return to idle
    fn finish_submission(
        &mut self,
        outcome: Result<FunctionReply, InvokeError>,
        request_id: Uuid,
        duration_ms: u128,
    ) -> Result<String, ConsoleError> {
        self.phase = Phase::Idle;

        match outcome {
            Ok(reply) if reply.success => match reply.into_content() {
                Some(content) => {
                    info!(
                        request_id = %request_id,
                        duration_ms = %duration_ms,
                        chars = content.chars().count(),
                        "completion received"
                    );
                    self.response = Some(content.clone());
                    Ok(content)
                }
                None => {
                    // success reported without any content to show
                    warn!(
                        request_id = %request_id,
                        duration_ms = %duration_ms,
                        "completion function reported an error"
                    );
                    Err(ConsoleError::service(GENERATION_FAILED_MESSAGE))
                }
            },
            Ok(reply) => {
                warn!(
                    request_id = %request_id,
                    duration_ms = %duration_ms,
                    "completion function reported an error"
                );
                let message = reply
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| GENERATION_FAILED_MESSAGE.to_string());
                Err(ConsoleError::Service { message })
            }
            Err(err) => {
                warn!(
                    request_id = %request_id,
                    duration_ms = %duration_ms,
                    error = %err,
                    "completion request failed"
                );
                Err(ConsoleError::service(CONNECTION_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompletionPayload;
    use crate::presets::PRESETS;
    use async_trait::async_trait;

    /// Client for tests that never reach the network
    struct NullClient;

    #[async_trait]
    impl CompletionClient for NullClient {
        async fn invoke_completion(
            &self,
            _payload: &CompletionPayload,
            _request_id: Uuid,
        ) -> Result<FunctionReply, InvokeError> {
            Err(InvokeError::transport("null client"))
        }
    }

    fn console() -> PromptConsole<NullClient> {
        PromptConsole::new(NullClient)
    }

    #[test]
    fn test_default_form_values() {
        let console = console();
        let form = console.form();
        assert_eq!(form.prompt, "");
        assert_eq!(form.chat_type, ChatType::Chat);
        assert_eq!(form.model, ModelId::Gpt35Turbo);
        assert_eq!(form.max_tokens, 1000);
        assert_eq!(form.temperature, 0.7);
    }

    #[test]
    fn test_request_rejects_blank_form() {
        let mut console = console();
        console.set_prompt("  \n ");
        assert!(matches!(
            console.form().request(),
            Err(ConsoleError::EmptyPrompt)
        ));
    }

    #[test]
    fn test_apply_preset_replaces_prompt() {
        let mut console = console();
        console.set_prompt("draft text");
        assert!(console.apply_preset(&PRESETS[1]));
        assert_eq!(
            console.form().prompt,
            "Generate a creative brief for a sci-fi movie project"
        );
    }

    #[test]
    fn test_apply_preset_is_noop_while_busy() {
        let mut console = console();
        console.set_prompt("draft text");
        console.phase = Phase::Busy;

        assert!(!console.apply_preset(&PRESETS[0]));
        assert_eq!(console.form().prompt, "draft text");
    }

    #[test]
    fn test_clear_works_in_any_phase() {
        let mut console = console();
        console.set_prompt("draft text");
        console.response = Some("old answer".to_string());
        console.phase = Phase::Busy;

        console.clear();
        assert_eq!(console.form().prompt, "");
        assert!(console.response().is_none());
        // clearing does not end the in-flight submission
        assert!(console.is_busy());
    }

    #[test]
    fn test_clear_keeps_other_form_fields() {
        let mut console = console();
        console.set_model(ModelId::Gpt4);
        console.set_max_tokens(2000);
        console.clear();
        assert_eq!(console.form().model, ModelId::Gpt4);
        assert_eq!(console.form().max_tokens, 2000);
    }

    #[test]
    fn test_finish_with_content_stores_response() {
        let mut console = console();
        console.phase = Phase::Busy;

        let result =
            console.finish_submission(Ok(FunctionReply::ok("an answer")), Uuid::new_v4(), 5);
        assert_eq!(result.unwrap(), "an answer");
        assert_eq!(console.response(), Some("an answer"));
        assert!(!console.is_busy());
    }

    #[test]
    fn test_finish_with_reported_error_keeps_message() {
        let mut console = console();
        console.phase = Phase::Busy;

        let result =
            console.finish_submission(Ok(FunctionReply::err("quota exceeded")), Uuid::new_v4(), 5);
        assert_eq!(
            result.unwrap_err(),
            ConsoleError::service("quota exceeded")
        );
        assert!(console.response().is_none());
        assert!(!console.is_busy());
    }

    #[test]
    fn test_finish_with_blank_error_falls_back() {
        let mut console = console();
        console.phase = Phase::Busy;

        let reply = FunctionReply {
            success: false,
            data: None,
            error: Some(String::new()),
        };
        let result = console.finish_submission(Ok(reply), Uuid::new_v4(), 5);
        assert_eq!(
            result.unwrap_err(),
            ConsoleError::service(GENERATION_FAILED_MESSAGE)
        );
    }

    #[test]
    fn test_finish_with_empty_success_falls_back() {
        let mut console = console();
        console.phase = Phase::Busy;

        let reply = FunctionReply {
            success: true,
            data: None,
            error: None,
        };
        let result = console.finish_submission(Ok(reply), Uuid::new_v4(), 5);
        assert_eq!(
            result.unwrap_err(),
            ConsoleError::service(GENERATION_FAILED_MESSAGE)
        );
        assert!(console.response().is_none());
    }

    #[test]
    fn test_finish_with_fault_uses_connection_message() {
        let mut console = console();
        console.phase = Phase::Busy;

        let result = console.finish_submission(
            Err(InvokeError::transport("connection refused")),
            Uuid::new_v4(),
            5,
        );
        assert_eq!(
            result.unwrap_err(),
            ConsoleError::service(CONNECTION_FAILED_MESSAGE)
        );
        assert!(!console.is_busy());
    }
}
