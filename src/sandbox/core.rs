use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::AuditLog;
use crate::auth::LoginGate;
use crate::config::Id1fsConfig;
use crate::error::{Id1fsError, StorageError};
use crate::metadata::MetadataStore;
use crate::storage::BackupStore;

/// Everything one ID1FS invocation operates on.
///
/// Owns the login gate, metadata store, backup store and audit log, and the
/// canonical sandbox root every name is resolved against. Operations take it
/// explicitly; there is no ambient session state.
#[derive(Debug)]
pub struct Sandbox {
    config: Id1fsConfig,
    root: PathBuf,
    gate: LoginGate,
    metadata: MetadataStore,
    backups: BackupStore,
    audit: AuditLog,
}

impl Sandbox {
    /// Creates the sandbox root if missing and wires up the stores.
    ///
    /// The backup directory is left alone until the first backup.
    pub fn open(config: Id1fsConfig) -> Result<Self, Id1fsError> {
        let home = config.sandbox_root_path();
        fs::create_dir_all(&home).map_err(|e| StorageError::IoError(home.clone(), e))?;
        let root = home
            .canonicalize()
            .map_err(|e| StorageError::IoError(home.clone(), e))?;

        info!("Sandbox root: {}", root.display());

        Ok(Self {
            gate: LoginGate::new(config.login_status_path(), config.lock_writes),
            metadata: MetadataStore::new(config.metadata_path(), config.lock_writes),
            backups: BackupStore::new(config.backup_path()),
            audit: AuditLog::new(config.log_path()),
            root,
            config,
        })
    }

    pub fn config(&self) -> &Id1fsConfig {
        &self.config
    }

    /// Canonical sandbox root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn gate(&self) -> &LoginGate {
        &self.gate
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }
}
