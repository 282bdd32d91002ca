//! # Domain Layer
//!
//! Talk messages, the companion persona, and the completion result taxonomy.
//! This layer is independent of HTTP frameworks and provider clients.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
