//! List operation

use log::warn;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use crate::error::{Id1fsError, StorageError};
use crate::metadata::record::format_timestamp;
use crate::operations::audit_failure;
use crate::operations::results::{EntryDetails, ListEntry, ListResult};
use crate::sandbox::Sandbox;
use crate::storage::filesystem;
use crate::storage::{ItemKind, resolve_in_sandbox};

/// Filters and extras for a directory listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub files_only: bool,
    pub dirs_only: bool,
    /// Only names starting with `.`
    pub hidden_only: bool,
    pub long: bool,
    pub count: bool,
    /// Attach file contents and directory children to each entry.
    ///
    /// Kept for compatibility with the older listing, where asking for
    /// subdirectories also dumped file contents. Off unless requested.
    pub show_file_content: bool,
}

impl ListOptions {
    fn includes(&self, kind: ItemKind) -> bool {
        match (self.files_only, self.dirs_only) {
            (true, false) => kind == ItemKind::File,
            (false, true) => kind == ItemKind::Directory,
            _ => true,
        }
    }

    fn audit_action(&self) -> &'static str {
        match (self.files_only, self.dirs_only) {
            (true, false) => "List Files",
            (false, true) => "List Directories",
            _ if self.hidden_only => "List Hidden Files",
            _ if self.long => "List File Details",
            _ => "List All in Directory",
        }
    }
}

/// Lists the direct children of `path`, resolved against the sandbox root.
///
/// An empty path lists the root itself. Entries are sorted by name.
pub fn list_directory(
    sandbox: &Sandbox,
    path: &str,
    options: ListOptions,
) -> Result<ListResult, Id1fsError> {
    let requested = if path.trim().is_empty() { "." } else { path };
    let context = format!("Listing '{requested}'");

    sandbox
        .gate()
        .require_login()
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    let dir = resolve_in_sandbox(sandbox.root(), requested)
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    if !dir.exists() {
        return Err(audit_failure(
            sandbox,
            "Error",
            &context,
            StorageError::NotFound(dir.display().to_string()),
        ));
    }
    if !filesystem::directory_exists(&dir) {
        return Err(audit_failure(
            sandbox,
            "Error",
            &context,
            StorageError::NotADirectory(dir.display().to_string()),
        ));
    }

    let read = fs::read_dir(&dir).map_err(|e| {
        audit_failure(
            sandbox,
            "Error",
            &context,
            StorageError::IoError(dir.clone(), e),
        )
    })?;

    let mut entries = Vec::new();
    for entry in read.filter_map(|entry| readable(&dir, entry)) {
        let name = entry.file_name().to_string_lossy().to_string();
        if options.hidden_only && !name.starts_with('.') {
            continue;
        }

        let entry_path = entry.path();
        let meta = match fs::metadata(&entry_path) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Skipping {}: {}", entry_path.display(), e);
                continue;
            }
        };

        let kind = ItemKind::from_metadata(&meta);
        if !options.includes(kind) {
            continue;
        }

        let mut listed = ListEntry {
            name,
            kind,
            details: options.long.then(|| entry_details(&meta)),
            content: None,
            children: Vec::new(),
        };

        if options.show_file_content {
            attach_content(sandbox.root(), &entry_path, &mut listed);
        }

        entries.push(listed);
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    sandbox.audit().details(
        options.audit_action(),
        format!("Listing the directory {requested} ({} entries)", entries.len()),
    );

    Ok(ListResult {
        path: dir,
        requested: requested.to_string(),
        count: options.count.then_some(entries.len()),
        entries,
    })
}

fn attach_content(sandbox_root: &Path, entry_path: &Path, listed: &mut ListEntry) {
    // Symlinked entries may point outside the sandbox
    let contained = match resolve_in_sandbox(sandbox_root, &entry_path.to_string_lossy()) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!("Not showing content of {}: {}", entry_path.display(), e);
            return;
        }
    };

    match listed.kind {
        ItemKind::File => match fs::read(&contained) {
            Ok(bytes) => listed.content = Some(String::from_utf8_lossy(&bytes).to_string()),
            Err(e) => warn!("Cannot read {}: {}", contained.display(), e),
        },
        ItemKind::Directory => match fs::read_dir(&contained) {
            Ok(children) => {
                let mut names: Vec<String> = children
                    .filter_map(|child| readable(&contained, child))
                    .map(|c| c.file_name().to_string_lossy().to_string())
                    .collect();
                names.sort();
                listed.children = names;
            }
            Err(e) => warn!("Cannot read {}: {}", contained.display(), e),
        },
    }
}

fn readable<T>(dir: &Path, entry: io::Result<T>) -> Option<T> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
            None
        }
    }
}

#[cfg(unix)]
fn entry_details(meta: &Metadata) -> EntryDetails {
    use std::os::unix::fs::MetadataExt;

    EntryDetails {
        mode: meta.mode(),
        nlink: meta.nlink(),
        uid: meta.uid(),
        gid: meta.gid(),
        size: meta.size(),
        modified: format_timestamp(meta.mtime()),
    }
}

#[cfg(not(unix))]
fn entry_details(meta: &Metadata) -> EntryDetails {
    let modified = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    EntryDetails {
        mode: if meta.permissions().readonly() { 0o444 } else { 0o644 },
        nlink: 1,
        uid: 0,
        gid: 0,
        size: meta.len(),
        modified: format_timestamp(modified),
    }
}
