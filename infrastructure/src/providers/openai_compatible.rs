//! OpenAI-compatible chat-completions client
//!
//! Works against any server exposing `POST {base_url}/chat/completions`:
//! OpenAI, Ollama (`/v1`), vLLM, LiteLLM and similar gateways.

use crate::config::FileModelConfig;
use async_trait::async_trait;
use costwise_application::{ModelClient, ModelError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur while building the client
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorDetail {
    Message { message: String },
    Text(String),
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Client configuration
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenAiCompatibleConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&FileModelConfig> for OpenAiCompatibleConfig {
    fn from(file: &FileModelConfig) -> Self {
        Self {
            base_url: file.base_url.clone(),
            model: file.model.clone(),
            api_key: file.api_key(),
            timeout: Duration::from_secs(file.request_timeout_seconds),
        }
    }
}

/// Model client speaking the chat-completions protocol
pub struct OpenAiCompatibleClient {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleClient {
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, ProviderError> {
        let base_url = config.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProviderError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build from the `[model]` section of the config file
    pub fn from_config(file: &FileModelConfig) -> Result<Self, ProviderError> {
        Self::new(OpenAiCompatibleConfig::from(file))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatibleClient {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        temperature: f32,
    ) -> Result<String, ModelError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature,
            stream: false,
        };

        debug!("Sending chat completion request to {}", self.endpoint());

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        parse_completion(&body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

fn map_send_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else if e.is_connect() {
        ModelError::Unavailable(format!("connection failed: {}", e))
    } else {
        ModelError::RequestFailed(e.to_string())
    }
}

fn status_error(status: u16, body: &str) -> ModelError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| match b.error {
            ApiErrorDetail::Message { message } => message,
            ApiErrorDetail::Text(text) => text,
        })
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        429 | 502 | 503 | 504 => ModelError::Unavailable(detail),
        _ => ModelError::RequestFailed(format!("HTTP {}: {}", status, detail)),
    }
}

fn parse_completion(body: &str) -> Result<String, ModelError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::MalformedOutput(format!("invalid response body: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ModelError::MalformedOutput("response has no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"summary\":\"ok\"}"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), r#"{"summary":"ok"}"#);
    }

    #[test]
    fn test_parse_completion_without_choices() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(ModelError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_completion("<html>"),
            Err(ModelError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error":{"message":"rate limited","type":"requests"}}"#;
        assert_eq!(
            status_error(429, body),
            ModelError::Unavailable("rate limited".to_string())
        );
        assert_eq!(
            status_error(400, r#"{"error":"bad model"}"#),
            ModelError::RequestFailed("HTTP 400: bad model".to_string())
        );
        assert_eq!(
            status_error(500, "oops"),
            ModelError::RequestFailed("HTTP 500: HTTP 500".to_string())
        );
    }

    #[test]
    fn test_endpoint_and_config() {
        let file = FileModelConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            request_timeout_seconds: 5,
            ..Default::default()
        };
        let client = OpenAiCompatibleClient::from_config(&file).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(client.config.timeout, Duration::from_secs(5));
        assert_eq!(client.name(), "llama3.1");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = OpenAiCompatibleConfig::new("localhost:11434", "m");
        assert!(matches!(
            OpenAiCompatibleClient::new(config),
            Err(ProviderError::InvalidBaseUrl(_))
        ));
    }
}
