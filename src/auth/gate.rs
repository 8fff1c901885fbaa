//! Login gate
//!
//! Persists the single session flag as `{"status": <bool>}`. Reads never fail:
//! a missing, unreadable or malformed file means "logged out".

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::storage::FileLock;

#[derive(Debug, Serialize, Deserialize)]
struct LoginStatus {
    status: bool,
}

/// Handle on the persisted session flag
#[derive(Debug, Clone)]
pub struct LoginGate {
    path: PathBuf,
    lock_writes: bool,
}

impl LoginGate {
    pub fn new(path: PathBuf, lock_writes: bool) -> Self {
        Self { path, lock_writes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted session flag, `false` on any read problem
    pub fn is_logged_in(&self) -> bool {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return false,
            Err(e) => {
                warn!(
                    "Login status {} unreadable, treating as logged out: {}",
                    self.path.display(),
                    e
                );
                return false;
            }
        };

        match serde_json::from_str::<LoginStatus>(&content) {
            Ok(state) => state.status,
            Err(e) => {
                warn!(
                    "Login status {} is malformed, treating as logged out: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// Persists the session flag
    pub fn set_logged_in(&self, logged_in: bool) -> Result<(), AuthError> {
        let _lock = if self.lock_writes {
            Some(
                FileLock::acquire(&self.path)
                    .map_err(|e| AuthError::StateWriteFailed(self.path.clone(), e))?,
            )
        } else {
            None
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AuthError::StateWriteFailed(self.path.clone(), e))?;
        }

        let json = serde_json::to_string(&LoginStatus { status: logged_in })
            .map_err(AuthError::StateEncodeFailed)?;
        fs::write(&self.path, json).map_err(|e| AuthError::StateWriteFailed(self.path.clone(), e))?;

        info!("Login status set to {}", logged_in);
        Ok(())
    }

    /// Fails with [`AuthError::NotLoggedIn`] unless the session flag is set
    pub fn require_login(&self) -> Result<(), AuthError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(AuthError::NotLoggedIn)
        }
    }
}
