//! Create operation

use log::{info, warn};
use std::fs;

use crate::error::{Id1fsError, StorageError};
use crate::metadata::{StatSnapshot, build_record};
use crate::operations::audit_failure;
use crate::operations::results::CreateResult;
use crate::sandbox::Sandbox;
use crate::storage::filesystem;
use crate::storage::{ItemKind, resolve_item_path, sandbox_relative_name};

/// Creates a file or directory under the sandbox root and records its metadata.
///
/// Directories are created with their parents and pre-existing ones are not
/// an error. Files receive the placeholder content and an existing file is
/// overwritten; the result's `overwrote` flag reports when that happened.
/// A symbolic link at the target is refused rather than written through.
pub fn create_item(
    sandbox: &Sandbox,
    name: &str,
    kind: ItemKind,
) -> Result<CreateResult, Id1fsError> {
    let action = format!("{} Creation", kind.label());
    let error_action = format!("{} Creation Error", kind.label());
    let context = format!("Creating '{name}'");

    sandbox
        .gate()
        .require_login()
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    let path = resolve_item_path(sandbox.root(), name)
        .map_err(|e| audit_failure(sandbox, &error_action, &context, e))?;
    let key = sandbox_relative_name(sandbox.root(), &path);

    if fs::symlink_metadata(&path).is_ok_and(|meta| meta.file_type().is_symlink()) {
        return Err(audit_failure(
            sandbox,
            &error_action,
            &context,
            StorageError::Symlink(key),
        ));
    }

    let existed = filesystem::file_exists(&path);
    let written = match kind {
        ItemKind::Directory => filesystem::create_directory(&path),
        ItemKind::File => filesystem::write_placeholder(&path, &key),
    };
    written.map_err(|e| {
        audit_failure(
            sandbox,
            &error_action,
            &context,
            StorageError::IoError(path.clone(), e),
        )
    })?;

    let overwrote = kind == ItemKind::File && existed;
    if overwrote {
        warn!("Overwrote existing file {}", path.display());
    }

    let stat = StatSnapshot::capture(&path).map_err(|e| {
        audit_failure(
            sandbox,
            &error_action,
            &context,
            StorageError::IoError(path.clone(), e),
        )
    })?;

    let update = sandbox
        .metadata()
        .upsert(&key, build_record(&stat))
        .map_err(|e| audit_failure(sandbox, &error_action, &context, e))?;

    sandbox.audit().details(
        "Metadata",
        format!("Metadata added for '{}' at '{}'", key, path.display()),
    );
    sandbox.audit().details(
        &action,
        format!("{} created: '{}'", kind.label(), path.display()),
    );
    info!("{} '{}' created at {}", kind.label(), key, path.display());

    Ok(CreateResult {
        name: key,
        path,
        kind,
        overwrote,
        warnings: update.warning.into_iter().collect(),
    })
}
