//! Sandbox storage management
//!
//! Handles file system primitives, path containment, backups and write locks.

pub mod backup;
pub mod filesystem;
pub mod lock;
pub mod validation;

pub use backup::BackupStore;
pub use filesystem::ItemKind;
pub use lock::FileLock;
pub use validation::{resolve_in_sandbox, resolve_item_path, sandbox_relative_name};
