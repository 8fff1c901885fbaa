//! Operation result types
//!
//! Defines result structures returned by sandbox operations.

use std::path::PathBuf;

use crate::storage::ItemKind;

/// Result of a create operation
#[derive(Debug, Clone)]
pub struct CreateResult {
    /// Metadata key, relative to the sandbox root
    pub name: String,
    pub path: PathBuf,
    pub kind: ItemKind,
    /// An existing file was replaced by the placeholder
    pub overwrote: bool,
    pub warnings: Vec<String>,
}

/// Result of a delete operation
#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub name: String,
    pub path: PathBuf,
    pub kind: ItemKind,
    /// Set for files only; directories are not backed up
    pub backup_path: Option<PathBuf>,
    pub metadata_removed: bool,
    pub warnings: Vec<String>,
}

/// Long-format details of a listed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    /// Full mode bits including type and special bits
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub modified: String,
}

#[derive(Debug, Clone)]
pub struct ListEntry {
    pub name: String,
    pub kind: ItemKind,
    pub details: Option<EntryDetails>,
    /// File content, when listing with content
    pub content: Option<String>,
    /// Direct children of a directory, when listing with content
    pub children: Vec<String>,
}

/// Result of a directory listing
#[derive(Debug, Clone)]
pub struct ListResult {
    pub path: PathBuf,
    /// The path as given by the caller
    pub requested: String,
    pub entries: Vec<ListEntry>,
    pub count: Option<usize>,
}

/// What a display operation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutput {
    Content(String),
    Numbered(String),
    LineCount(usize),
    CharCount(usize),
}

#[derive(Debug, Clone)]
pub struct DisplayResult {
    pub path: PathBuf,
    pub output: DisplayOutput,
}

/// Result of a line/word/character count
#[derive(Debug, Clone)]
pub struct CountResult {
    pub path: PathBuf,
    pub mode: super::count::CountMode,
    pub count: usize,
}

/// Result of login, logout or a status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub was_logged_in: bool,
    pub logged_in: bool,
}
