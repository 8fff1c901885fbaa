//! Error handlers
//!
//! Maps errors to process exit codes and reports them.

use crate::error::types::{AuthError, Id1fsError, StorageError};
use log::error;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_LOGGED_IN: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_PATH_ESCAPE: u8 = 5;

/// Handle an ID1FS error
pub fn handle_error(err: &Id1fsError) {
    error!("ID1FS error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &Id1fsError) -> u8 {
    match err {
        Id1fsError::Auth(AuthError::NotLoggedIn) => EXIT_NOT_LOGGED_IN,
        Id1fsError::Storage(StorageError::NotFound(_)) => EXIT_NOT_FOUND,
        Id1fsError::Storage(StorageError::PathEscape(_)) => EXIT_PATH_ESCAPE,
        _ => EXIT_FAILURE,
    }
}
