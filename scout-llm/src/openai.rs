//! OpenAI-compatible chat provider.
//!
//! Speaks the `chat/completions` wire format, so it also covers the many
//! self-hosted gateways that mimic it. The blocking impl builds its own
//! `reqwest::blocking` client and must not be called from inside an async
//! runtime; async hosts use the [`AsyncChatProvider`] impl.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scout_core::GenerationError;
use serde::{Deserialize, Serialize};

use crate::provider::{AsyncChatProvider, ChatProvider};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat provider over an OpenAI-compatible HTTP API.
pub struct OpenAiChatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point at a non-default gateway, e.g. a self-hosted proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn failed(&self, message: impl Into<String>) -> GenerationError {
        GenerationError::ProviderFailed {
            provider: self.model.clone(),
            message: message.into(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> GenerationError {
        GenerationError::InvalidResponse {
            provider: self.model.clone(),
            reason: reason.into(),
        }
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn error_from_status(&self, status: StatusCode, text: String) -> GenerationError {
        let message = match serde_json::from_str::<ApiError>(&text) {
            Ok(api_error) => api_error.error.message,
            Err(_) => text,
        };
        match status {
            StatusCode::TOO_MANY_REQUESTS => self.failed(format!("rate limited: {}", message)),
            _ => self.failed(format!("status {}: {}", status.as_u16(), message)),
        }
    }

    fn first_choice(&self, parsed: ChatResponse) -> Result<String, GenerationError> {
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| self.invalid("response contained no choices"))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl AsyncChatProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.chat_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(system, user))
            .send()
            .await
            .map_err(|e| self.failed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(self.error_from_status(status, text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.invalid(format!("failed to parse response: {}", e)))?;
        self.first_choice(parsed)
    }
}

impl ChatProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        &self.model
    }

    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.chat_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(system, user))
            .send()
            .map_err(|e| self.failed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(self.error_from_status(status, text));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| self.invalid(format!("failed to parse response: {}", e)))?;
        self.first_choice(parsed)
    }
}

impl std::fmt::Debug for OpenAiChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
