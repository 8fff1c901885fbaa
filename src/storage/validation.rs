//! Path validation
//!
//! Resolves user-supplied names against the sandbox root and enforces
//! containment on the canonical result. Symlinks are followed component by
//! component, so `..` is applied to the real parent, never the lexical one.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Resolves `name` against `sandbox_root` and verifies the result stays inside it.
///
/// `sandbox_root` must already be canonical. Relative names are joined to the
/// root; absolute names are taken as-is and checked the same way. The target
/// itself does not have to exist.
pub fn resolve_in_sandbox(sandbox_root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    check_name(name)?;

    let resolved = canonicalize_lenient(&sandbox_root.join(name), name)?;
    if !resolved.starts_with(sandbox_root) {
        return Err(StorageError::PathEscape(name.to_string()));
    }

    Ok(resolved)
}

/// Resolves the item an operation creates or deletes.
///
/// Only the parent is canonicalized and checked for containment. The final
/// component is kept as given, so a symlink names the link itself rather
/// than its target. The sandbox root itself is refused.
pub fn resolve_item_path(sandbox_root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    check_name(name)?;

    let candidate = sandbox_root.join(name);
    let item = match Path::new(name).components().next_back() {
        Some(Component::Normal(item)) => item.to_os_string(),
        // `.`, `..` or a bare root: nothing literal to keep
        _ => {
            let resolved = resolve_in_sandbox(sandbox_root, name)?;
            if resolved == sandbox_root {
                return Err(StorageError::InvalidName(name.to_string()));
            }
            return Ok(resolved);
        }
    };

    let parent = candidate
        .parent()
        .ok_or_else(|| StorageError::InvalidName(name.to_string()))?;
    let parent = canonicalize_lenient(parent, name)?;
    if !parent.starts_with(sandbox_root) {
        return Err(StorageError::PathEscape(name.to_string()));
    }

    Ok(parent.join(item))
}

fn check_name(name: &str) -> Result<(), StorageError> {
    if name.trim().is_empty() || name.contains('\0') {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Name of a resolved path relative to the sandbox root, `/`-separated.
///
/// This is the key under which the item is tracked in the metadata store.
pub fn sandbox_relative_name(sandbox_root: &Path, resolved: &Path) -> String {
    match resolved.strip_prefix(sandbox_root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => resolved.to_string_lossy().to_string(),
    }
}

fn canonicalize_lenient(path: &Path, name: &str) -> Result<PathBuf, StorageError> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => {
                resolved.push(part);
                match fs::symlink_metadata(&resolved) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        resolved = match fs::canonicalize(&resolved) {
                            Ok(target) => target,
                            // A dangling link cannot be proven to stay inside the root
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                                return Err(StorageError::PathEscape(name.to_string()));
                            }
                            Err(e) => return Err(StorageError::IoError(resolved, e)),
                        };
                    }
                    Ok(_) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StorageError::IoError(resolved, e)),
                }
            }
        }
    }

    Ok(resolved)
}
