mod chat_turn;
mod completion;
mod persona;
mod talk_message;

pub use chat_turn::*;
pub use completion::*;
pub use persona::*;
pub use talk_message::*;
