//! HTTP boundary: `POST /api/talk` in front of the completion proxy.

mod error;
mod handlers;
mod server;
mod state;

pub use error::ApiError;
pub use handlers::{TalkResponse, TALK_ROUTE};
pub use server::{build_router, serve};
pub use state::AppState;
