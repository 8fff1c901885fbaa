//! Delete operation

use log::info;
use std::fs;
use std::io;

use crate::error::{Id1fsError, StorageError};
use crate::operations::audit_failure;
use crate::operations::results::DeleteResult;
use crate::sandbox::Sandbox;
use crate::storage::{ItemKind, resolve_item_path, sandbox_relative_name};

/// Deletes a file or directory tree and drops its metadata record.
///
/// Files are copied to the backup store first and are only removed once that
/// copy succeeded. Directory trees are removed without a backup, together
/// with the records of everything below them. A symbolic link is removed
/// itself, never its target, and carries no data to back up. Metadata is left
/// untouched whenever removal fails.
pub fn delete_item(
    sandbox: &Sandbox,
    name: &str,
    kind: ItemKind,
) -> Result<DeleteResult, Id1fsError> {
    let action = format!("{} Deletion", kind.label());
    let error_action = format!("{} Deletion Error", kind.label());
    let context = format!("Deleting '{name}'");

    sandbox
        .gate()
        .require_login()
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    let path = resolve_item_path(sandbox.root(), name)
        .map_err(|e| audit_failure(sandbox, &error_action, &context, e))?;
    let key = sandbox_relative_name(sandbox.root(), &path);

    let (found, is_link) = match fs::symlink_metadata(&path) {
        Ok(meta) => (ItemKind::from_metadata(&meta), meta.file_type().is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(audit_failure(
                sandbox,
                &error_action,
                &context,
                StorageError::NotFound(path.display().to_string()),
            ));
        }
        Err(e) => {
            return Err(audit_failure(
                sandbox,
                &error_action,
                &context,
                StorageError::IoError(path.clone(), e),
            ));
        }
    };

    if found != kind {
        let mismatch = match kind {
            ItemKind::File => StorageError::NotAFile(path.display().to_string()),
            ItemKind::Directory => StorageError::NotADirectory(path.display().to_string()),
        };
        return Err(audit_failure(sandbox, &error_action, &context, mismatch));
    }

    let backup_path = match kind {
        ItemKind::File if is_link => {
            fs::remove_file(&path).map_err(|e| {
                audit_failure(
                    sandbox,
                    &error_action,
                    &context,
                    StorageError::IoError(path.clone(), e),
                )
            })?;
            None
        }
        ItemKind::File => {
            let backup_path = sandbox
                .backups()
                .backup(&key, &path)
                .map_err(|e| audit_failure(sandbox, &error_action, &context, e))?;
            sandbox.audit().details(
                "Backup",
                format!("Item '{}' backed up to '{}'", key, backup_path.display()),
            );

            fs::remove_file(&path).map_err(|e| {
                audit_failure(
                    sandbox,
                    &error_action,
                    &context,
                    StorageError::IoError(path.clone(), e),
                )
            })?;
            Some(backup_path)
        }
        ItemKind::Directory => {
            fs::remove_dir_all(&path).map_err(|e| {
                audit_failure(
                    sandbox,
                    &error_action,
                    &context,
                    StorageError::IoError(path.clone(), e),
                )
            })?;
            None
        }
    };

    sandbox.audit().details(
        &action,
        format!("{} '{}' deleted successfully", kind.label(), path.display()),
    );

    let removal = match kind {
        ItemKind::File => sandbox.metadata().remove(&key),
        ItemKind::Directory => sandbox.metadata().remove_tree(&key),
    };
    let update = removal
        .map_err(|e| audit_failure(sandbox, "Metadata Removal Error", &context, e))?;
    if update.changed {
        sandbox
            .audit()
            .details("Metadata Removal", format!("Metadata removed for '{key}'"));
    }

    info!("{} '{}' deleted from {}", kind.label(), key, path.display());

    Ok(DeleteResult {
        name: key,
        path,
        kind,
        backup_path,
        metadata_removed: update.changed,
        warnings: update.warning.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Id1fsConfig;
    use crate::operations::create_item;

    fn logged_in() -> (tempfile::TempDir, Sandbox) {
        let dir = tempfile::tempdir().unwrap();
        let sandbox = Sandbox::open(Id1fsConfig::for_root(dir.path())).unwrap();
        sandbox.gate().set_logged_in(true).unwrap();
        (dir, sandbox)
    }

    #[test]
    fn test_delete_file_backs_up_first() {
        let (_dir, sandbox) = logged_in();
        create_item(&sandbox, "notes.txt", ItemKind::File).unwrap();

        let result = delete_item(&sandbox, "notes.txt", ItemKind::File).unwrap();
        assert!(!result.path.exists());
        assert!(result.metadata_removed);
        let backup = result.backup_path.unwrap();
        assert!(backup.exists());
        assert!(sandbox.metadata().get("notes.txt").is_none());
    }

    #[test]
    fn test_delete_directory_tree_without_backup() {
        let (_dir, sandbox) = logged_in();
        create_item(&sandbox, "docs", ItemKind::Directory).unwrap();
        create_item(&sandbox, "docs/a.txt", ItemKind::File).unwrap();

        let result = delete_item(&sandbox, "docs", ItemKind::Directory).unwrap();
        assert!(!result.path.exists());
        assert!(result.backup_path.is_none());
        assert!(!sandbox.backups().root().exists());
        assert!(sandbox.metadata().get("docs").is_none());
    }

    #[test]
    fn test_delete_directory_drops_nested_records() {
        let (_dir, sandbox) = logged_in();
        create_item(&sandbox, "docs", ItemKind::Directory).unwrap();
        create_item(&sandbox, "docs/a.txt", ItemKind::File).unwrap();
        create_item(&sandbox, "docs/sub", ItemKind::Directory).unwrap();
        create_item(&sandbox, "docs/sub/b.txt", ItemKind::File).unwrap();
        create_item(&sandbox, "docs2.txt", ItemKind::File).unwrap();

        let result = delete_item(&sandbox, "docs", ItemKind::Directory).unwrap();
        assert!(result.metadata_removed);

        let keys: Vec<String> = sandbox.metadata().load().records.into_keys().collect();
        assert_eq!(keys, vec!["docs2.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_removes_link_only() {
        let (_dir, sandbox) = logged_in();
        create_item(&sandbox, "real.txt", ItemKind::File).unwrap();
        let alias = sandbox.root().join("alias");
        std::os::unix::fs::symlink(sandbox.root().join("real.txt"), &alias).unwrap();

        let result = delete_item(&sandbox, "alias", ItemKind::File).unwrap();
        assert_eq!(result.name, "alias");
        assert!(result.backup_path.is_none());
        assert!(fs::symlink_metadata(&alias).is_err());
        assert!(sandbox.root().join("real.txt").is_file());
        assert!(sandbox.metadata().get("real.txt").is_some());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, sandbox) = logged_in();
        let err = delete_item(&sandbox, "ghost.txt", ItemKind::File).unwrap_err();
        assert!(matches!(err, Id1fsError::Storage(StorageError::NotFound(_))));
    }

    #[test]
    fn test_kind_mismatch_touches_nothing() {
        let (_dir, sandbox) = logged_in();
        let dir = create_item(&sandbox, "docs", ItemKind::Directory).unwrap();

        let err = delete_item(&sandbox, "docs", ItemKind::File).unwrap_err();
        assert!(matches!(err, Id1fsError::Storage(StorageError::NotAFile(_))));
        assert!(dir.path.is_dir());
        assert!(sandbox.metadata().get("docs").is_some());

        let file = create_item(&sandbox, "f.txt", ItemKind::File).unwrap();
        let err = delete_item(&sandbox, "f.txt", ItemKind::Directory).unwrap_err();
        assert!(matches!(err, Id1fsError::Storage(StorageError::NotADirectory(_))));
        assert!(file.path.is_file());
    }

    #[test]
    fn test_failed_backup_keeps_original_and_metadata() {
        let (dir, sandbox) = logged_in();
        create_item(&sandbox, "keep.txt", ItemKind::File).unwrap();

        // A regular file where the backup directory should be
        fs::write(dir.path().join("backup"), "blocker").unwrap();

        let err = delete_item(&sandbox, "keep.txt", ItemKind::File).unwrap_err();
        assert!(matches!(err, Id1fsError::Backup(_)));
        assert!(sandbox.root().join("keep.txt").exists());
        assert!(sandbox.metadata().get("keep.txt").is_some());

        let log = fs::read_to_string(sandbox.audit().path()).unwrap();
        assert!(log.contains("Action: File Deletion Error"));
        assert!(!log.contains("Action: File Deletion\n"));
    }
}
