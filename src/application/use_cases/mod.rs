mod chat_session;
mod complete_message;

pub use chat_session::*;
pub use complete_message::*;
