use std::fmt;

use crate::domain::{ValidationError, MAX_MESSAGE_CHARS};

/// A user message that passed boundary validation.
///
/// Holding a `TalkMessage` means the text is trimmed, non-empty and at most
/// [`MAX_MESSAGE_CHARS`] UTF-16 units long, so the completion proxy never has
/// to re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkMessage {
    text: String,
    turn: Option<u64>,
}

impl TalkMessage {
    /// Validate raw input. `None` covers a missing or non-string `message` field.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let text = raw.map(trim_message).unwrap_or_default();

        if text.is_empty() {
            return Err(ValidationError::MissingMessage);
        }

        let actual = unit_count(text);
        if actual > MAX_MESSAGE_CHARS {
            return Err(ValidationError::TooLong {
                limit: MAX_MESSAGE_CHARS,
                actual,
            });
        }

        Ok(Self {
            text: text.to_string(),
            turn: None,
        })
    }

    /// Attach the client's 1-based user-turn index. Only used for logging.
    pub fn with_turn(mut self, turn: Option<u64>) -> Self {
        self.turn = turn;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn turn(&self) -> Option<u64> {
        self.turn
    }

    pub fn unit_count(&self) -> usize {
        unit_count(&self.text)
    }
}

/// Whitespace plus the byte-order mark, which browsers also strip on trim.
fn trim_message(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Length in UTF-16 code units: astral characters such as emoji count twice.
fn unit_count(text: &str) -> usize {
    text.encode_utf16().count()
}

impl fmt::Display for TalkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
