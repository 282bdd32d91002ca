use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shown when the talk endpoint answered with an error.
pub const FALLBACK_RECEIVED: &str = "我有收到你剛剛那段話。\n\n現在先不用把它說得很完整也沒關係，你能把它放出來，本身就不容易。\n\n如果你願意，可以再多留一點點：此刻最卡的是哪一小塊？";

/// Shown when the talk endpoint could not be reached at all.
pub const FALLBACK_STALLED: &str = "我在，但剛剛系統有點卡住。\n\n你不需要重打全部；你可以用一句話接著說，我會在這裡。\n\n如果你願意，就從「現在最難受的地方是…」開始也可以。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of a client-side chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    id: Uuid,
    role: Role,
    text: String,
    fallback: bool,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            fallback: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.into(),
            fallback: false,
        }
    }

    /// A canned assistant turn rendered in place of an error.
    pub fn fallback_for(error: &TalkError) -> Self {
        let text = match error {
            TalkError::Transport(_) => FALLBACK_STALLED,
            _ => FALLBACK_RECEIVED,
        };
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.to_string(),
            fallback: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Errors seen by a client of the talk endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TalkError {
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("model returned no reply content")]
    EmptyReply,

    #[error("talk endpoint unreachable: {0}")]
    Transport(String),

    #[error("unexpected talk response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_text_depends_on_failure() {
        let rejected = TalkError::Rejected {
            status: 500,
            message: "provider call failed".to_string(),
        };
        let turn = ChatTurn::fallback_for(&rejected);
        assert!(turn.is_fallback());
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.text(), FALLBACK_RECEIVED);

        let stalled = ChatTurn::fallback_for(&TalkError::Transport("refused".into()));
        assert_eq!(stalled.text(), FALLBACK_STALLED);
    }

    #[test]
    fn fallback_replies_have_three_paragraphs() {
        for text in [FALLBACK_RECEIVED, FALLBACK_STALLED] {
            assert_eq!(text.split("\n\n").count(), 3);
        }
    }

    #[test]
    fn turns_get_distinct_ids() {
        let a = ChatTurn::user("a");
        let b = ChatTurn::user("a");
        assert_ne!(a.id(), b.id());
        assert!(!a.is_fallback());
    }
}
