//! Scoped advisory locks for whole-file rewrites.
//!
//! A lock is taken on a sibling `<file>.lock` and released when the guard is
//! dropped. It only orders cooperating ID1FS processes; the data files keep
//! last-writer-wins semantics.

use fs2::FileExt;
use log::warn;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Lock guard that releases the lock when dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock guarding `path`, blocking until available.
    pub fn acquire(path: &Path) -> io::Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;

        Ok(FileLock { file, lock_path })
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release lock {}: {}", self.lock_path.display(), e);
        }
    }
}
