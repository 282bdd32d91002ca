use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{CompletionError, CompletionRequest};

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Explicit provider configuration, injected into [`OpenAiChatClient::new`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer credential. `None` makes every call fail with a configuration error.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Wall-clock deadline for one call, from connect until the body is read.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the environment:
    ///
    /// | Variable        | Default                       | Purpose              |
    /// |-----------------|-------------------------------|----------------------|
    /// | `GROQ_API_KEY`  | unset                         | Bearer credential    |
    /// | `GROQ_BASE_URL` | `https://api.groq.com/openai` | Any compatible server|
    /// | `GROQ_MODEL`    | `llama-3.1-8b-instant`        | Model id             |
    pub fn from_env() -> Self {
        let key = std::env::var("GROQ_API_KEY").ok();
        let base =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(key, base).with_model(model)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ApiMessage<'a>; 2],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for OpenAI-compatible chat completion APIs (Groq by default).
///
/// The per-call deadline is attached to the request itself, so when it expires
/// reqwest drops the in-flight future together with its connection.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: ProviderConfig,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(config: ProviderConfig) -> Self {
        let url = format!(
            "{}{COMPLETIONS_PATH}",
            config.base_url.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            return CompletionError::Timeout(self.config.timeout);
        }
        CompletionError::provider(
            e.status().map(|s| s.as_u16()),
            format!("request failed: {e}"),
            String::new(),
        )
    }

    /// Map a 2xx body onto the strict response schema.
    fn parse_body(status: u16, body: String) -> Result<String, CompletionError> {
        let parsed: ApiResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(CompletionError::provider(
                    Some(status),
                    format!("malformed response: {e}"),
                    body,
                ))
            }
        };

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(CompletionError::provider(
                Some(status),
                "response has no choices",
                body,
            ));
        };

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("OpenAiChatClient: no provider credential configured (GROQ_API_KEY)");
            return Err(CompletionError::Configuration);
        };

        let body = ApiRequest {
            model: &self.config.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            messages: [
                ApiMessage {
                    role: "system",
                    content: &request.system,
                },
                ApiMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        debug!("OpenAiChatClient: POST {} model={}", self.url, self.config.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!("OpenAiChatClient: API returned {status}: {text}");
            return Err(CompletionError::provider(
                Some(status.as_u16()),
                format!("API returned {status}"),
                text,
            ));
        }

        Self::parse_body(status.as_u16(), text)
    }
}
