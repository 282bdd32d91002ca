//! Shared harness: a talk server on an ephemeral port, an axum fake provider
//! and a provider that never answers.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use muutalk::connector::http::{self, AppState};
use muutalk::{ChatClient, CompleteMessageUseCase, OpenAiChatClient, ProviderConfig};

pub const TEST_KEY: &str = "test-key";

pub struct TalkServer {
    pub base_url: String,
    shutdown: CancellationToken,
}

impl TalkServer {
    pub fn talk_url(&self) -> String {
        format!("{}/api/talk", self.base_url)
    }
}

impl Drop for TalkServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub async fn spawn_talk_server(client: Arc<dyn ChatClient>) -> TalkServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let shutdown = CancellationToken::new();
    let state = AppState::new(Arc::new(CompleteMessageUseCase::new(client)));

    tokio::spawn(http::serve(listener, state, shutdown.clone()));

    TalkServer {
        base_url: format!("http://{addr}"),
        shutdown,
    }
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeProviderState {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// An OpenAI-compatible endpoint answering every call with a fixed response.
pub struct FakeProvider {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown: CancellationToken,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn client(&self) -> OpenAiChatClient {
        OpenAiChatClient::new(ProviderConfig::new(
            Some(TEST_KEY.to_string()),
            self.base_url.clone(),
        ))
    }
}

impl Drop for FakeProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn fake_completions(
    State(state): State<FakeProviderState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.seen.lock().unwrap().push(SeenRequest {
        authorization,
        body,
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

pub async fn spawn_fake_provider(status: u16, body: impl Into<String>) -> FakeProvider {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = FakeProviderState {
        status: StatusCode::from_u16(status).expect("status"),
        body: body.into(),
        seen: seen.clone(),
    };
    let app = axum::Router::new()
        .route("/v1/chat/completions", post(fake_completions))
        .with_state(state);
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(token.cancelled_owned())
            .await;
    });

    FakeProvider {
        base_url: format!("http://{addr}"),
        seen,
        shutdown,
    }
}

pub fn completion_body(content: Option<&str>) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// A provider that accepts one connection, reads the request and never
/// answers. The receiver fires once the client closes the socket.
pub async fn spawn_stalled_provider() -> (String, oneshot::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("addr");
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut buf = [0u8; 4096];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        let _ = closed_tx.send(());
    });

    (format!("http://{addr}"), closed_rx)
}

/// Base URL of a port nobody listens on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn short_timeout() -> Duration {
    Duration::from_millis(300)
}
