//! Metadata store
//!
//! A single JSON mapping from item name to [`MetadataRecord`], rewritten in
//! full on every change. A missing file is an empty store; an unreadable or
//! malformed file is also treated as empty, reported as a warning and
//! replaced on the next write.

use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::MetadataError;
use crate::metadata::record::MetadataRecord;
use crate::storage::FileLock;

pub type MetadataMap = BTreeMap<String, MetadataRecord>;

/// Store contents plus any problem found while reading them
#[derive(Debug, Clone, Default)]
pub struct LoadedMetadata {
    pub records: MetadataMap,
    pub warning: Option<String>,
}

/// Outcome of an `upsert` or `remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUpdate {
    /// Whether an entry was added, replaced or deleted
    pub changed: bool,
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
    lock_writes: bool,
}

impl MetadataStore {
    pub fn new(path: PathBuf, lock_writes: bool) -> Self {
        Self { path, lock_writes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole mapping
    pub fn load(&self) -> LoadedMetadata {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadedMetadata::default(),
            Err(e) => return self.malformed(format!("cannot be read ({e})")),
        };

        if content.trim().is_empty() {
            return LoadedMetadata::default();
        }

        match serde_json::from_str::<MetadataMap>(&content) {
            Ok(records) => LoadedMetadata {
                records,
                warning: None,
            },
            Err(e) => self.malformed(format!("is malformed ({e})")),
        }
    }

    pub fn get(&self, name: &str) -> Option<MetadataRecord> {
        self.load().records.remove(name)
    }

    /// Inserts or replaces the record for `name`
    pub fn upsert(&self, name: &str, record: MetadataRecord) -> Result<StoreUpdate, MetadataError> {
        let _lock = self.lock()?;
        let LoadedMetadata {
            mut records,
            warning,
        } = self.load();

        records.insert(name.to_string(), record);
        self.write(&records)?;

        info!("Metadata added for '{}'", name);
        Ok(StoreUpdate {
            changed: true,
            warning,
        })
    }

    /// Deletes the record for `name`; absent names are a no-op
    pub fn remove(&self, name: &str) -> Result<StoreUpdate, MetadataError> {
        let _lock = self.lock()?;
        let LoadedMetadata {
            mut records,
            warning,
        } = self.load();

        let changed = records.remove(name).is_some();
        if changed || warning.is_some() {
            self.write(&records)?;
        }

        if changed {
            info!("Metadata removed for '{}'", name);
        }
        Ok(StoreUpdate { changed, warning })
    }

    /// Deletes the record for `name` and every record nested below it,
    /// in a single rewrite
    pub fn remove_tree(&self, name: &str) -> Result<StoreUpdate, MetadataError> {
        let _lock = self.lock()?;
        let LoadedMetadata {
            mut records,
            warning,
        } = self.load();

        let prefix = format!("{name}/");
        let before = records.len();
        records.retain(|key, _| key != name && !key.starts_with(&prefix));
        let removed = before - records.len();

        let changed = removed > 0;
        if changed || warning.is_some() {
            self.write(&records)?;
        }

        if changed {
            info!("Metadata removed for '{}' ({} records)", name, removed);
        }
        Ok(StoreUpdate { changed, warning })
    }

    fn write(&self, records: &MetadataMap) -> Result<(), MetadataError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| MetadataError::IoError(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_string_pretty(records).map_err(MetadataError::EncodeFailed)?;
        fs::write(&self.path, json).map_err(|e| MetadataError::IoError(self.path.clone(), e))
    }

    fn lock(&self) -> Result<Option<FileLock>, MetadataError> {
        if !self.lock_writes {
            return Ok(None);
        }
        FileLock::acquire(&self.path)
            .map(Some)
            .map_err(|e| MetadataError::LockFailed(self.path.clone(), e))
    }

    fn malformed(&self, problem: String) -> LoadedMetadata {
        let warning = format!(
            "Metadata file {} {}; it will be recreated",
            self.path.display(),
            problem
        );
        warn!("{}", warning);
        LoadedMetadata {
            records: MetadataMap::new(),
            warning: Some(warning),
        }
    }
}
