//! Sandbox handle
//!
//! The single state handle passed to every operation.

pub mod core;

pub use self::core::Sandbox;
