//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Provider clients (OpenAI-compatible HTTP, scripted mock)
//! - The axum HTTP boundary serving `/api/talk`
//! - The CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
