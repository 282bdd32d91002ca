//! # Application Layer
//!
//! Use cases and the ports they depend on: the provider-facing chat client and
//! the client-facing talk API.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
