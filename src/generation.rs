//! Text generation collaborator
//!
//! The assist core sees generation as prompt in, text or error out. The
//! runtime calls a [`TextGenerator`] off the event thread and feeds the
//! result back as a message.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub const MAX_OUTPUT_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;

/// Identifies one in-flight generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Everything the generator needs for one call
#[derive(Clone, PartialEq)]
pub struct GenerationPayload {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationPayload {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

impl fmt::Debug for GenerationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationPayload")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Remote text generation
pub trait TextGenerator: Send + Sync {
    fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError>;
}

// ============================================================================
// Chat-completions wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_request(payload: &GenerationPayload) -> ChatRequest<'_> {
    ChatRequest {
        model: &payload.model,
        messages: vec![ChatMessage {
            role: "user",
            content: &payload.prompt,
        }],
        max_tokens: payload.max_tokens,
        temperature: payload.temperature,
    }
}

/// Extract the first choice's text from a chat-completions response body
pub fn parse_completion(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::transport(format!("Invalid response: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| GenerationError::transport("Response contained no text"))
}

/// Chat-completions client
pub struct OpenAiGenerator {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OpenAiGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        // `None` also lifts the blocking client's built-in 30s default
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl TextGenerator for OpenAiGenerator {
    fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError> {
        tracing::debug!(model = %payload.model, endpoint = %self.endpoint, "sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&payload.api_key)
            .json(&chat_request(payload))
            .send()
            .map_err(|e| GenerationError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generation request failed");
            return Err(GenerationError::http(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| GenerationError::transport(e.to_string()))?;
        parse_completion(&body)
    }
}

/// Offline generator that answers with the prompt itself
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoGenerator;

impl TextGenerator for EchoGenerator {
    fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError> {
        Ok(payload.prompt.trim().to_string())
    }
}
