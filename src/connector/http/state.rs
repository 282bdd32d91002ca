use std::sync::Arc;

use crate::application::CompleteMessageUseCase;

/// Shared handler state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    complete_message: Arc<CompleteMessageUseCase>,
}

impl AppState {
    pub fn new(complete_message: Arc<CompleteMessageUseCase>) -> Self {
        Self { complete_message }
    }

    pub fn complete_message(&self) -> &CompleteMessageUseCase {
        &self.complete_message
    }
}
