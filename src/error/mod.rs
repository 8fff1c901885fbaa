//! Error handling
//!
//! Defines error types and handling for ID1FS.

pub mod handlers;
pub mod types;

pub use types::*;
