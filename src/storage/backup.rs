//! Backup store
//!
//! Copies a sandbox file into the flat backup directory before it is deleted.
//! Backups are named `<name>_<YYYYMMDDHHMMSS>`, with `_1`, `_2`, ... appended
//! when that name is taken. Existing backups are never overwritten or pruned.

use chrono::Local;
use log::{error, info};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::BackupError;

const BACKUP_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Flat directory of timestamped file copies, created on first use
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies `source` (the sandbox item tracked as `name`) into the backup
    /// directory, preserving its modification time.
    ///
    /// Returns the backup path. On error nothing usable is left behind and the
    /// caller must not remove the original.
    pub fn backup(&self, name: &str, source: &Path) -> Result<PathBuf, BackupError> {
        let source_meta = fs::metadata(source)
            .map_err(|_| BackupError::SourceMissing(source.display().to_string()))?;

        if !source_meta.is_file() {
            return Err(BackupError::NotAFile(source.display().to_string()));
        }

        fs::create_dir_all(&self.root).map_err(|e| BackupError::IoError(self.root.clone(), e))?;

        let stamp = Local::now().format(BACKUP_STAMP_FORMAT).to_string();
        let (backup_path, mut dest) = self.reserve(&backup_file_name(name, &stamp))?;

        if let Err(e) = copy_with_mtime(source, &mut dest) {
            error!(
                "Backup of {} to {} failed: {}",
                source.display(),
                backup_path.display(),
                e
            );
            drop(dest);
            let _ = fs::remove_file(&backup_path);
            return Err(BackupError::IoError(backup_path, e));
        }

        info!("Backed up {} to {}", source.display(), backup_path.display());
        Ok(backup_path)
    }

    /// Creates a fresh backup file, suffixing `base` until the name is unused
    fn reserve(&self, base: &str) -> Result<(PathBuf, File), BackupError> {
        let mut attempt = 0u32;
        loop {
            let file_name = match attempt {
                0 => base.to_string(),
                n => format!("{base}_{n}"),
            };
            let path = self.root.join(file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(BackupError::IoError(path, e)),
            }
        }
    }
}

/// Backup file name for an item, with path separators flattened
pub fn backup_file_name(name: &str, stamp: &str) -> String {
    let flat: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{flat}_{stamp}")
}

fn copy_with_mtime(source: &Path, dest: &mut File) -> io::Result<()> {
    let mut input = File::open(source)?;
    io::copy(&mut input, dest)?;
    dest.set_modified(input.metadata()?.modified()?)?;
    Ok(())
}
