//! Error types
//!
//! Defines domain-specific error types for each module of ID1FS.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Login gate errors
#[derive(Debug)]
pub enum AuthError {
    NotLoggedIn,
    StateWriteFailed(PathBuf, io::Error),
    StateEncodeFailed(serde_json::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotLoggedIn => write!(f, "Login status is off. Please login first"),
            AuthError::StateWriteFailed(p, e) => {
                write!(f, "Failed to write login status {}: {}", p.display(), e)
            }
            AuthError::StateEncodeFailed(e) => write!(f, "Failed to encode login status: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

/// Sandbox storage errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    NotAFile(String),
    NotADirectory(String),
    InvalidName(String),
    PathEscape(String),
    Symlink(String),
    IoError(PathBuf, io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::NotAFile(p) => write!(f, "Not a file: {}", p),
            StorageError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            StorageError::InvalidName(n) => write!(f, "Invalid name: '{}'", n),
            StorageError::PathEscape(p) => {
                write!(f, "Path '{}' is not allowed: it resolves outside the sandbox root", p)
            }
            StorageError::Symlink(p) => {
                write!(f, "'{}' is a symbolic link; refusing to write through it", p)
            }
            StorageError::IoError(p, e) => write!(f, "I/O error on {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Metadata store errors
#[derive(Debug)]
pub enum MetadataError {
    IoError(PathBuf, io::Error),
    EncodeFailed(serde_json::Error),
    LockFailed(PathBuf, io::Error),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::IoError(p, e) => {
                write!(f, "Metadata I/O error on {}: {}", p.display(), e)
            }
            MetadataError::EncodeFailed(e) => write!(f, "Failed to encode metadata: {}", e),
            MetadataError::LockFailed(p, e) => {
                write!(f, "Failed to lock {}: {}", p.display(), e)
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// Backup store errors
#[derive(Debug)]
pub enum BackupError {
    SourceMissing(String),
    NotAFile(String),
    IoError(PathBuf, io::Error),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::SourceMissing(p) => write!(f, "Backup source not found: {}", p),
            BackupError::NotAFile(p) => write!(f, "Only regular files can be backed up: {}", p),
            BackupError::IoError(p, e) => write!(f, "Backup failed on {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for BackupError {}

/// General ID1FS error that encompasses all error types
#[derive(Debug)]
pub enum Id1fsError {
    Auth(AuthError),
    Storage(StorageError),
    Metadata(MetadataError),
    Backup(BackupError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for Id1fsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id1fsError::Auth(e) => write!(f, "{}", e),
            Id1fsError::Storage(e) => write!(f, "{}", e),
            Id1fsError::Metadata(e) => write!(f, "{}", e),
            Id1fsError::Backup(e) => write!(f, "{}", e),
            Id1fsError::Config(e) => write!(f, "Configuration error: {}", e),
            Id1fsError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Id1fsError {}

impl From<AuthError> for Id1fsError {
    fn from(error: AuthError) -> Self {
        Id1fsError::Auth(error)
    }
}

impl From<StorageError> for Id1fsError {
    fn from(error: StorageError) -> Self {
        Id1fsError::Storage(error)
    }
}

impl From<MetadataError> for Id1fsError {
    fn from(error: MetadataError) -> Self {
        Id1fsError::Metadata(error)
    }
}

impl From<BackupError> for Id1fsError {
    fn from(error: BackupError) -> Self {
        Id1fsError::Backup(error)
    }
}

impl From<config::ConfigError> for Id1fsError {
    fn from(error: config::ConfigError) -> Self {
        Id1fsError::Config(error)
    }
}

impl From<io::Error> for Id1fsError {
    fn from(error: io::Error) -> Self {
        Id1fsError::IoError(error)
    }
}
