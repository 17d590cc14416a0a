use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Credentials, OpenAiConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Raw response of one chat completion, stored verbatim.
///
/// Header values are kept in arrival order; a repeated header such as
/// `set-cookie` keeps every value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRecord {
    pub data: serde_json::Value,
    pub headers: BTreeMap<String, Vec<String>>,
}

impl CompletionRecord {
    /// Text of the first choice, if the payload has the usual chat completion shape.
    pub fn chapters_text(&self) -> Option<&str> {
        self.data["choices"][0]["message"]["content"].as_str()
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("chat completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("chat completion response is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a chat completion request.
pub trait ChatCompletion {
    fn complete(&self, request: &ChatRequest) -> Result<CompletionRecord, LlmError>;
}

pub struct OpenAiClient {
    endpoint: String,
    credentials: Credentials,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, credentials: Credentials) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            credentials,
            client,
        })
    }
}

impl ChatCompletion for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<CompletionRecord, LlmError> {
        tracing::info!(
            "Sending chat completion request to {} (model {})",
            self.endpoint,
            request.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.credentials.api_key)
            .header("OpenAI-Organization", &self.credentials.organization)
            .json(request)
            .send()?;

        let status = response.status();
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        let body = response.text()?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = serde_json::from_str(&body)?;

        if let Some(usage) = data.get("usage") {
            tracing::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage["prompt_tokens"],
                usage["completion_tokens"],
                usage["total_tokens"]
            );
        }

        Ok(CompletionRecord { data, headers })
    }
}
