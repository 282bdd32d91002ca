pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{ChatClient, ChatSession, CompleteMessageUseCase, TalkApi};

pub use connector::{
    HttpTalkClient, MockChatClient, OpenAiChatClient, ProviderConfig, DEFAULT_BASE_URL,
    DEFAULT_MODEL, DEFAULT_TIMEOUT,
};

pub use domain::{
    ChatTurn, CompletionError, CompletionErrorKind, CompletionRequest, CompletionResult,
    Persona, Reply, Role, TalkError, TalkMessage, ValidationError,
    MAX_MESSAGE_CHARS,
};
