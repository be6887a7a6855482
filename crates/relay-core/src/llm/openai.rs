//! OpenAI chat-completions client
//!
//! Blocking, non-streaming. Works with any OpenAI-compatible endpoint.

use super::{ChatClient, ChatMessage, ChatRequest, LlmError};
use crate::config::LlmConfig;
use serde::Deserialize;
use std::time::Duration;

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiClient {
    /// API key
    api_key: String,

    /// Base URL for the API (supports OpenAI-compatible APIs)
    base_url: String,

    /// HTTP agent carrying the timeout
    agent: ureq::Agent,
}

impl OpenAiClient {
    /// Create a new client with the default base URL
    pub fn new(api_key: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Create from config; the key must already be validated
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| LlmError::Api {
                status: 401,
                message: "No API key configured".to_string(),
            })?;
        Ok(Self::new(api_key, Duration::from_secs(config.timeout)).with_base_url(&config.base_url))
    }

    /// Use a different base URL (Azure, local proxies)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the request body: system instructions, then the conversation
fn request_body(request: &ChatRequest<'_>) -> serde_json::Value {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if !request.instructions.is_empty() {
        messages.push(serde_json::json!({
            "role": "system",
            "content": request.instructions
        }));
    }
    messages.extend(request.messages.iter().map(|m| {
        serde_json::json!({
            "role": m.role_str(),
            "content": m.content
        })
    }));

    serde_json::json!({
        "model": request.model,
        "messages": messages
    })
}

/// Extract the assistant reply from a completion body
fn parse_completion(body: &str) -> Result<ChatMessage, LlmError> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;
    Ok(ChatMessage::assistant(choice.message.content.unwrap_or_default()))
}

impl ChatClient for OpenAiClient {
    fn complete(&self, request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(agent = request.agent, model = request.model, "POST {}", url);

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(request_body(request))?;

        let body = response.into_string()?;
        let reply = parse_completion(&body)?;

        let mut conversation = request.messages.to_vec();
        conversation.push(reply);
        Ok(conversation)
    }
}
