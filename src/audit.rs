//! Audit log
//!
//! Append-only, human-readable action history. Each record is one block:
//!
//! ```text
//! Action: File Creation
//! Timestamp: 2024-01-01 12:00:00
//! Details: File created: '/home/me/ID1FS/home/notes.txt'
//!
//! ```
//!
//! The log is never read back by ID1FS itself.

use chrono::{DateTime, Local};
use log::error;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing field of an audit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Details(String),
    Success(bool),
}

#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub action: String,
    pub timestamp: DateTime<Local>,
    pub outcome: AuditOutcome,
}

impl AuditRecord {
    pub fn new(action: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            timestamp: Local::now(),
            outcome,
        }
    }

    /// Renders the record as a log block, blank line included
    pub fn render(&self) -> String {
        let mut block = format!(
            "Action: {}\nTimestamp: {}\n",
            self.action,
            self.timestamp.format(TIMESTAMP_FORMAT)
        );
        match &self.outcome {
            AuditOutcome::Details(details) => block.push_str(&format!("Details: {details}\n")),
            AuditOutcome::Success(success) => block.push_str(&format!("Success: {success}\n")),
        }
        block.push('\n');
        block
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record, creating the log file and its directory if needed
    pub fn append(&self, record: &AuditRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.render().as_bytes())
    }

    /// Records an action with a free-text detail.
    ///
    /// Audit failures never abort the operation being audited; they are
    /// reported through `log` instead.
    pub fn details(&self, action: &str, details: impl Into<String>) {
        self.record(AuditRecord::new(action, AuditOutcome::Details(details.into())));
    }

    pub fn success(&self, action: &str, success: bool) {
        self.record(AuditRecord::new(action, AuditOutcome::Success(success)));
    }

    fn record(&self, record: AuditRecord) {
        if let Err(e) = self.append(&record) {
            error!(
                "Failed to write audit record '{}' to {}: {}",
                record.action,
                self.path.display(),
                e
            );
        }
    }
}
