//! Error handling
//!
//! Defines error types and user-facing rendering for the credential core and the CLI.

pub mod handlers;
pub mod types;

pub use types::*;
