//! ID1FS - a sandboxed home tree with per-item metadata, a login gate,
//! backup-on-delete and an append-only audit log.

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod operations;
pub mod sandbox;
pub mod storage;

pub use crate::config::Id1fsConfig;
pub use crate::error::Id1fsError;
pub use crate::sandbox::Sandbox;
