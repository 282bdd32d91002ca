use async_trait::async_trait;

use crate::domain::{CompletionError, CompletionRequest};

/// An interface for sending one persona-plus-message request to a chat
/// completion provider.
///
/// Implementors own transport, credentials, deadlines and the provider's wire
/// format. They return the raw text of the first completion; trimming and the
/// empty-reply check belong to [`crate::application::CompleteMessageUseCase`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Issue exactly one provider call. Implementations must not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
