use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::TalkApi;
use crate::domain::TalkError;

const TALK_PATH: &str = "/api/talk";

#[derive(Serialize)]
struct TalkBody<'a> {
    message: &'a str,
    turn: u64,
}

#[derive(Deserialize)]
struct TalkReply {
    #[serde(default)]
    reply: Option<String>,
}

#[derive(Deserialize)]
struct TalkFailure {
    #[serde(default)]
    error: Option<String>,
}

/// [`TalkApi`] over HTTP against a running `muutalk serve`.
pub struct HttpTalkClient {
    client: reqwest::Client,
    url: String,
}

impl HttpTalkClient {
    /// `timeout` should exceed the server's provider deadline so the server's
    /// own timeout error reaches the caller.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{TALK_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TalkApi for HttpTalkClient {
    async fn talk(&self, message: &str, turn: u64) -> Result<String, TalkError> {
        let response = self
            .client
            .post(&self.url)
            .json(&TalkBody { message, turn })
            .send()
            .await
            .map_err(|e| TalkError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TalkError::Transport(e.to_string()))?;
        debug!("HttpTalkClient: {} -> {status}", self.url);

        if !status.is_success() {
            let message = serde_json::from_str::<TalkFailure>(&text)
                .ok()
                .and_then(|f| f.error)
                .unwrap_or_else(|| "request failed".to_string());
            return Err(TalkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: TalkReply =
            serde_json::from_str(&text).map_err(|e| TalkError::Malformed(e.to_string()))?;

        match body.reply.map(|r| r.trim().to_string()) {
            Some(reply) if !reply.is_empty() => Ok(reply),
            _ => Err(TalkError::EmptyReply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_points_at_talk_route() {
        let client = HttpTalkClient::new("http://127.0.0.1:8787/", Duration::from_secs(20));
        assert_eq!(client.url(), "http://127.0.0.1:8787/api/talk");
    }
}
