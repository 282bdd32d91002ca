use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Outcome of a single proxied completion.
pub type CompletionResult = Result<Reply, CompletionError>;

/// The provider-facing request assembled from the persona and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Assistant text that is guaranteed non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply(String);

impl Reply {
    /// Trim the raw provider output. Blank output is a provider defect.
    pub fn from_raw(raw: &str) -> Result<Self, CompletionError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(CompletionError::EmptyReply);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure taxonomy of the completion proxy. None of these are retried.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("provider credential is not configured")]
    Configuration,

    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("provider call failed: {reason}")]
    Provider {
        status: Option<u16>,
        reason: String,
        body: String,
    },

    #[error("model returned no reply content")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    ConfigurationError,
    TimeoutError,
    ProviderError,
    EmptyReplyError,
}

impl CompletionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "ConfigurationError",
            Self::TimeoutError => "TimeoutError",
            Self::ProviderError => "ProviderError",
            Self::EmptyReplyError => "EmptyReplyError",
        }
    }
}

impl fmt::Display for CompletionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CompletionError {
    pub fn provider(status: Option<u16>, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Provider {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn kind(&self) -> CompletionErrorKind {
        match self {
            Self::Configuration => CompletionErrorKind::ConfigurationError,
            Self::Timeout(_) => CompletionErrorKind::TimeoutError,
            Self::Provider { .. } => CompletionErrorKind::ProviderError,
            Self::EmptyReply => CompletionErrorKind::EmptyReplyError,
        }
    }

    /// HTTP status surfaced to the caller of `/api/talk`.
    ///
    /// Upstream 4xx/5xx statuses are propagated as-is; anything else a provider
    /// failure carries (transport error, malformed 2xx body) becomes 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Configuration | Self::EmptyReply => 500,
            Self::Timeout(_) => 504,
            Self::Provider { status, .. } => status
                .filter(|s| (400..600).contains(s))
                .unwrap_or(500),
        }
    }

    /// Short message for the `error` field of the boundary response.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Configuration => "provider credential is not configured",
            Self::Timeout(_) => "provider timed out",
            Self::Provider { .. } => "provider call failed",
            Self::EmptyReply => "model returned no reply content",
        }
    }

    /// Diagnostic payload for the `detail` field. The raw provider body is
    /// returned as JSON when it parses, otherwise as a string.
    pub fn detail(&self) -> Option<Value> {
        match self {
            Self::Provider { body, reason, .. } => {
                if body.is_empty() {
                    return Some(Value::String(reason.clone()));
                }
                Some(
                    serde_json::from_str::<Value>(body)
                        .unwrap_or_else(|_| Value::String(body.clone())),
                )
            }
            _ => None,
        }
    }
}
