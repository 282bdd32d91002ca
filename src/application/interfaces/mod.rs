mod chat_client;
mod talk_api;

pub use chat_client::*;
pub use talk_api::*;
