//! Metadata records
//!
//! A record is a snapshot of an item's stat data taken when it was written.
//! Records are not re-synced if the item changes outside ID1FS.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::audit::TIMESTAMP_FORMAT;

/// Stored attribute snapshot for one sandbox item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub path: String,
    pub created_at: String,
    pub last_modified_at: String,
    pub size: u64,
    /// `mode & 0o777` as an octal literal, e.g. `0o644`
    pub permissions: String,
    pub owner: u32,
    pub group: u32,
    /// Older files may lack the flag; it always gets written back.
    #[serde(default)]
    pub is_directory: bool,
}

/// The stat fields a record is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSnapshot {
    pub path: PathBuf,
    /// Status change time (seconds since the epoch)
    pub changed_secs: i64,
    pub modified_secs: i64,
    pub size: u64,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub is_dir: bool,
}

impl StatSnapshot {
    /// Stats `path`, following symlinks
    #[cfg(unix)]
    pub fn capture(path: &Path) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let meta = fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            changed_secs: meta.ctime(),
            modified_secs: meta.mtime(),
            size: meta.size(),
            mode: meta.mode(),
            uid: meta.uid(),
            gid: meta.gid(),
            is_dir: meta.is_dir(),
        })
    }

    #[cfg(not(unix))]
    pub fn capture(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        let secs = |t: io::Result<std::time::SystemTime>| {
            t.ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        };
        let mode = if meta.permissions().readonly() { 0o444 } else { 0o644 };
        Ok(Self {
            path: path.to_path_buf(),
            changed_secs: secs(meta.created()),
            modified_secs: secs(meta.modified()),
            size: meta.len(),
            mode: if meta.is_dir() { mode | 0o111 } else { mode },
            uid: 0,
            gid: 0,
            is_dir: meta.is_dir(),
        })
    }
}

/// Builds a record from a stat snapshot
pub fn build_record(stat: &StatSnapshot) -> MetadataRecord {
    MetadataRecord {
        path: stat.path.to_string_lossy().to_string(),
        created_at: format_timestamp(stat.changed_secs),
        last_modified_at: format_timestamp(stat.modified_secs),
        size: stat.size,
        permissions: format!("{:#o}", stat.mode & 0o777),
        owner: stat.uid,
        group: stat.gid,
        is_directory: stat.is_dir,
    }
}

/// Formats epoch seconds as local `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        None => secs.to_string(),
    }
}
