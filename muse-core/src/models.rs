//! Request and reply types for the remote completion function
//!
//! Everything that crosses the wire lives here: the option enums the form
//! selects from, the validated [`PromptRequest`], the JSON payload built from
//! it, and the reply envelope the function answers with.

use crate::error::ConsoleError;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest response budget the completion function accepts
pub const MIN_MAX_TOKENS: u32 = 1;

/// Largest response budget the completion function accepts
pub const MAX_MAX_TOKENS: u32 = 4000;

/// Lower bound for sampling temperature
pub const MIN_TEMPERATURE: f32 = 0.0;

/// Upper bound for sampling temperature
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Response budget used until the user picks one
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Sampling temperature used until the user picks one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Interaction style requested from the completion function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Chat,
    Completion,
    Analysis,
    Generation,
}

impl ChatType {
    /// All selectable types, in menu order
    pub const ALL: [ChatType; 4] = [
        ChatType::Chat,
        ChatType::Completion,
        ChatType::Analysis,
        ChatType::Generation,
    ];

    /// Wire name sent in the payload `type` field
    pub fn as_str(self) -> &'static str {
        match self {
            ChatType::Chat => "chat",
            ChatType::Completion => "completion",
            ChatType::Analysis => "analysis",
            ChatType::Generation => "generation",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            ChatType::Chat => "Chat",
            ChatType::Completion => "Completion",
            ChatType::Analysis => "Analysis",
            ChatType::Generation => "Generation",
        }
    }

    /// One-line menu description
    pub fn description(self) -> &'static str {
        match self {
            ChatType::Chat => "Interactive conversation",
            ChatType::Completion => "Text completion",
            ChatType::Analysis => "Content analysis",
            ChatType::Generation => "Creative content",
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(ChatType::Chat),
            "completion" => Ok(ChatType::Completion),
            "analysis" => Ok(ChatType::Analysis),
            "generation" => Ok(ChatType::Generation),
            other => bail!(
                "unknown chat type '{}' (expected chat, completion, analysis or generation)",
                other
            ),
        }
    }
}

/// Model selectable for a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelId {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl ModelId {
    /// All selectable models, in menu order
    pub const ALL: [ModelId; 3] = [ModelId::Gpt35Turbo, ModelId::Gpt4, ModelId::Gpt4Turbo];

    /// Wire name sent in the payload `model` field
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt35Turbo => "gpt-3.5-turbo",
            ModelId::Gpt4 => "gpt-4",
            ModelId::Gpt4Turbo => "gpt-4-turbo",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            ModelId::Gpt35Turbo => "GPT-3.5 Turbo",
            ModelId::Gpt4 => "GPT-4",
            ModelId::Gpt4Turbo => "GPT-4 Turbo",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt-3.5-turbo" => Ok(ModelId::Gpt35Turbo),
            "gpt-4" => Ok(ModelId::Gpt4),
            "gpt-4-turbo" => Ok(ModelId::Gpt4Turbo),
            other => bail!(
                "unknown model '{}' (expected gpt-3.5-turbo, gpt-4 or gpt-4-turbo)",
                other
            ),
        }
    }
}

/// Validated submission parameters
///
/// Construction trims the prompt and clamps the numeric fields, so a request
/// in hand is always sendable.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    text: String,
    chat_type: ChatType,
    model: ModelId,
    max_tokens: u32,
    temperature: f32,
}

impl PromptRequest {
    /// Build a request from raw form values
    ///
    /// Fails only when the prompt is empty after trimming; out-of-range
    /// numeric values are clamped, never rejected.
    pub fn new(
        text: &str,
        chat_type: ChatType,
        model: ModelId,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self, ConsoleError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConsoleError::EmptyPrompt);
        }

        // NaN cannot be clamped; fall back to the default
        let temperature = if temperature.is_nan() {
            DEFAULT_TEMPERATURE
        } else {
            temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        };

        Ok(Self {
            text: text.to_string(),
            chat_type,
            model,
            max_tokens: max_tokens.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS),
            temperature,
        })
    }

    /// Trimmed prompt text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clamped response budget
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Clamped sampling temperature
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Convert into the JSON payload sent to the function
    pub fn into_payload(self) -> CompletionPayload {
        CompletionPayload {
            prompt: self.text,
            chat_type: self.chat_type,
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// JSON body POSTed to the completion function
///
/// Field names are fixed by the function contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPayload {
    pub prompt: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub model: ModelId,
    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Reply envelope returned by the completion function
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionReply {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CompletionData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a successful reply
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionData {
    pub content: String,
}

impl FunctionReply {
    /// Successful envelope carrying generated text
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(CompletionData {
                content: content.into(),
            }),
            error: None,
        }
    }

    /// Failure envelope carrying a reported error message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Generated text, if the envelope actually carries one
    pub fn into_content(self) -> Option<String> {
        self.data.map(|d| d.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_type_wire_names() {
        assert_eq!(serde_json::to_value(ChatType::Chat).unwrap(), json!("chat"));
        assert_eq!(
            serde_json::to_value(ChatType::Generation).unwrap(),
            json!("generation")
        );
        assert_eq!("analysis".parse::<ChatType>().unwrap(), ChatType::Analysis);
        assert!("translation".parse::<ChatType>().is_err());
    }

    #[test]
    fn test_model_wire_names_and_labels() {
        assert_eq!(
            serde_json::to_value(ModelId::Gpt35Turbo).unwrap(),
            json!("gpt-3.5-turbo")
        );
        assert_eq!(ModelId::Gpt4Turbo.label(), "GPT-4 Turbo");
        assert_eq!(" GPT-4 ".parse::<ModelId>().unwrap(), ModelId::Gpt4);
        assert!("davinci".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_prompt_request_trims_text() {
        let request =
            PromptRequest::new("  hello  ", ChatType::Chat, ModelId::Gpt4, 1000, 0.7).unwrap();
        assert_eq!(request.text(), "hello");
    }

    #[test]
    fn test_prompt_request_rejects_whitespace_only() {
        let result = PromptRequest::new("   \n\t ", ChatType::Chat, ModelId::Gpt4, 1000, 0.7);
        assert!(matches!(result, Err(ConsoleError::EmptyPrompt)));
    }

    #[test]
    fn test_prompt_request_clamps_bounds() {
        let request = PromptRequest::new("hi", ChatType::Chat, ModelId::Gpt4, 9999, 5.0).unwrap();
        assert_eq!(request.max_tokens(), MAX_MAX_TOKENS);
        assert_eq!(request.temperature(), MAX_TEMPERATURE);

        let request = PromptRequest::new("hi", ChatType::Chat, ModelId::Gpt4, 0, -1.0).unwrap();
        assert_eq!(request.max_tokens(), MIN_MAX_TOKENS);
        assert_eq!(request.temperature(), MIN_TEMPERATURE);
    }

    #[test]
    fn test_prompt_request_nan_temperature_falls_back() {
        let request =
            PromptRequest::new("hi", ChatType::Chat, ModelId::Gpt4, 1000, f32::NAN).unwrap();
        assert_eq!(request.temperature(), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_payload_field_names() {
        let payload = PromptRequest::new("  ping ", ChatType::Analysis, ModelId::Gpt4Turbo, 500, 1.5)
            .unwrap()
            .into_payload();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "prompt": "ping",
                "type": "analysis",
                "model": "gpt-4-turbo",
                "maxTokens": 500,
                "temperature": 1.5
            })
        );
    }

    #[test]
    fn test_reply_envelope_decodes() {
        let reply: FunctionReply =
            serde_json::from_str(r#"{"success":true,"data":{"content":"hi"}}"#).unwrap();
        assert!(reply.success);
        assert_eq!(reply.into_content().as_deref(), Some("hi"));

        let reply: FunctionReply =
            serde_json::from_str(r#"{"success":false,"error":"quota exceeded"}"#).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("quota exceeded"));

        // success reported without any data block
        let reply: FunctionReply = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(reply.success);
        assert!(reply.into_content().is_none());
    }
}
