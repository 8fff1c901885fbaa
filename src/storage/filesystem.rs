//! File system operations
//!
//! Thin helpers over `std::fs` used by the sandbox operations.

use std::fs::{self, Metadata};
use std::io::Result;
use std::path::Path;

/// Kind of sandbox item an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

impl ItemKind {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            ItemKind::Directory
        } else {
            ItemKind::File
        }
    }

    pub fn is_directory(self) -> bool {
        self == ItemKind::Directory
    }

    /// Human label used in messages and audit actions
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::File => "File",
            ItemKind::Directory => "Directory",
        }
    }
}

/// Content written into every newly created file
pub fn placeholder_content(name: &str) -> String {
    format!("Content of created file: {name}\n")
}

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

/// Write the placeholder content, truncating any existing file
pub fn write_placeholder(path: &Path, name: &str) -> Result<()> {
    fs::write(path, placeholder_content(name))
}

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.is_dir()
}
