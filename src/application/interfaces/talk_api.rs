use async_trait::async_trait;

use crate::domain::TalkError;

/// Client side of `POST /api/talk`.
#[async_trait]
pub trait TalkApi: Send + Sync {
    /// Send one message with its 1-based user-turn index and return the reply text.
    async fn talk(&self, message: &str, turn: u64) -> Result<String, TalkError>;
}
