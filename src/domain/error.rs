use thiserror::Error;

/// Maximum length of a talk message after trimming, counted in UTF-16 code
/// units the way the browser client measures its input.
pub const MAX_MESSAGE_CHARS: usize = 3000;

/// Rejection reasons for an incoming talk message.
///
/// The `Display` strings are the exact `error` texts returned at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing or malformed message")]
    MissingMessage,

    #[error("message too long (limit {limit})")]
    TooLong { limit: usize, actual: usize },

    /// The request body was cut off before it could be read, so the message
    /// is over the limit whatever its exact length.
    #[error("message too long (limit {})", MAX_MESSAGE_CHARS)]
    BodyTooLarge,
}
