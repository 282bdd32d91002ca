use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::TalkApi;
use crate::domain::{ChatTurn, Role, TalkError};

/// In-memory chat log driven against the talk endpoint.
///
/// Each user message is sent on its own; the endpoint keeps no conversation
/// memory, so the log only exists for display and turn numbering.
pub struct ChatSession {
    api: Arc<dyn TalkApi>,
    turns: Vec<ChatTurn>,
    last_error: Option<TalkError>,
    fallback_replies: bool,
}

impl ChatSession {
    pub fn new(api: Arc<dyn TalkApi>) -> Self {
        Self {
            api,
            turns: Vec::new(),
            last_error: None,
            fallback_replies: false,
        }
    }

    /// Render a canned assistant reply in place of errors.
    pub fn with_fallback_replies(mut self, enabled: bool) -> Self {
        self.fallback_replies = enabled;
        self
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn user_turns(&self) -> u64 {
        self.turns.iter().filter(|t| t.role() == Role::User).count() as u64
    }

    pub fn last_error(&self) -> Option<&TalkError> {
        self.last_error.as_ref()
    }

    /// Send one message. Blank input is ignored and yields `Ok(None)`.
    ///
    /// The user turn is appended before the call so it stays in the log even
    /// when the call fails.
    pub async fn send(&mut self, text: &str) -> Result<Option<&ChatTurn>, TalkError> {
        let clean = text.trim();
        if clean.is_empty() {
            return Ok(None);
        }

        self.last_error = None;
        self.turns.push(ChatTurn::user(clean));
        let turn = self.user_turns();
        debug!(turn, "Sending chat message");

        let outcome = match self.api.talk(clean, turn).await {
            Ok(reply) if reply.trim().is_empty() => Err(TalkError::EmptyReply),
            Ok(reply) => Ok(ChatTurn::assistant(reply.trim())),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(assistant) => {
                self.turns.push(assistant);
            }
            Err(e) => {
                warn!(turn, "Chat message failed: {e}");
                self.last_error = Some(e.clone());
                if !self.fallback_replies {
                    return Err(e);
                }
                self.turns.push(ChatTurn::fallback_for(&e));
            }
        }

        Ok(self.turns.last())
    }

    pub fn reset(&mut self) {
        self.turns.clear();
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{FALLBACK_RECEIVED, FALLBACK_STALLED};

    #[derive(Default)]
    struct ScriptedTalk {
        outcomes: Mutex<Vec<Result<String, TalkError>>>,
        seen: Mutex<Vec<(String, u64)>>,
    }

    impl ScriptedTalk {
        fn with(outcomes: Vec<Result<String, TalkError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(String, u64)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TalkApi for ScriptedTalk {
        async fn talk(&self, message: &str, turn: u64) -> Result<String, TalkError> {
            self.seen.lock().unwrap().push((message.to_string(), turn));
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("嗯，我在。".to_string()))
        }
    }

    #[tokio::test]
    async fn numbers_user_turns_only() {
        let api = Arc::new(ScriptedTalk::default());
        let mut session = ChatSession::new(api.clone());

        session.send("第一句").await.unwrap();
        session.send("  第二句 ").await.unwrap();

        assert_eq!(
            api.seen(),
            vec![("第一句".to_string(), 1), ("第二句".to_string(), 2)]
        );
        assert_eq!(session.turns().len(), 4);
        assert_eq!(session.user_turns(), 2);
        assert_eq!(session.turns()[1].role(), Role::Assistant);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let api = Arc::new(ScriptedTalk::default());
        let mut session = ChatSession::new(api.clone());

        assert!(session.send("   ").await.unwrap().is_none());
        assert!(session.turns().is_empty());
        assert!(api.seen().is_empty());
    }

    #[tokio::test]
    async fn error_keeps_user_turn_without_fallback() {
        let api = Arc::new(ScriptedTalk::with(vec![Err(TalkError::Rejected {
            status: 500,
            message: "provider call failed".to_string(),
        })]));
        let mut session = ChatSession::new(api);

        let err = session.send("hello").await.unwrap_err();

        assert!(matches!(err, TalkError::Rejected { status: 500, .. }));
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.last_error(), Some(&err));
    }

    #[tokio::test]
    async fn fallback_renders_canned_reply() {
        let api = Arc::new(ScriptedTalk::with(vec![
            Err(TalkError::Rejected {
                status: 504,
                message: "provider timed out".to_string(),
            }),
            Err(TalkError::Transport("connection refused".to_string())),
        ]));
        let mut session = ChatSession::new(api).with_fallback_replies(true);

        let turn = session.send("one").await.unwrap().unwrap().clone();
        assert!(turn.is_fallback());
        assert_eq!(turn.text(), FALLBACK_RECEIVED);
        assert!(session.last_error().is_some());

        let turn = session.send("two").await.unwrap().unwrap().clone();
        assert_eq!(turn.text(), FALLBACK_STALLED);
        assert_eq!(session.user_turns(), 2);
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        let api = Arc::new(ScriptedTalk::with(vec![Ok("  \n ".to_string())]));
        let mut session = ChatSession::new(api);

        assert_eq!(
            session.send("hi").await.unwrap_err(),
            TalkError::EmptyReply
        );
    }

    #[tokio::test]
    async fn reset_clears_log_and_error() {
        let api = Arc::new(ScriptedTalk::with(vec![Err(TalkError::EmptyReply)]));
        let mut session = ChatSession::new(api.clone());

        let _ = session.send("hi").await;
        session.reset();

        assert!(session.turns().is_empty());
        assert!(session.last_error().is_none());

        session.send("again").await.unwrap();
        assert_eq!(api.seen().last(), Some(&("again".to_string(), 1)));
    }
}
