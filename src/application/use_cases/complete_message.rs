use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{CompletionResult, Persona, Reply, TalkMessage};

/// The completion proxy: one validated message in, one persona reply or one
/// structured failure out.
///
/// Stateless and safe to call concurrently. Makes exactly one provider call per
/// invocation and never substitutes canned text for a failure.
pub struct CompleteMessageUseCase {
    client: Arc<dyn ChatClient>,
    persona: Persona,
}

impl CompleteMessageUseCase {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            persona: Persona::companion(),
        }
    }

    pub async fn execute(&self, message: &TalkMessage) -> CompletionResult {
        let request = self.persona.request_for(message);
        let start_time = Instant::now();

        let outcome = self
            .client
            .complete(&request)
            .await
            .and_then(|raw| Reply::from_raw(&raw));

        match &outcome {
            Ok(reply) => debug!(
                turn = ?message.turn(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                reply_chars = reply.as_str().chars().count(),
                "Completion succeeded"
            ),
            Err(e) => warn!(
                turn = ?message.turn(),
                kind = %e.kind(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Completion failed: {e}"
            ),
        }

        outcome
    }
}
