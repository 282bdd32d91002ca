mod mock_chat_client;
mod openai_chat_client;
mod talk_http_client;

pub use mock_chat_client::*;
pub use openai_chat_client::*;
pub use talk_http_client::*;
