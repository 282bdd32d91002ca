use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{CompletionError, CompletionRequest};

const DEFAULT_REPLY: &str = "我有聽到你說的。\n\n這一刻不需要整理好，就先這樣放著也可以。\n\n我在這裡，陪你待一下。";

/// Scripted [`ChatClient`] for offline runs (`--mock-provider`) and tests.
///
/// Queued outcomes are returned in order; once the queue is empty every call
/// gets the default reply. Calls and the last request are recorded.
pub struct MockChatClient {
    outcomes: Mutex<VecDeque<Result<String, CompletionError>>>,
    last_request: Mutex<Option<CompletionRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            last_request: Mutex::new(None),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    pub fn with_failure(self, error: CompletionError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sleep before answering, to exercise slow-provider paths.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn push(&self, outcome: Result<String, CompletionError>) {
        if let Ok(mut queue) = self.outcomes.lock() {
            queue.push_back(outcome);
        }
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()));

        debug!(call, ok = outcome.is_ok(), "MockChatClient answered");
        outcome
    }
}
