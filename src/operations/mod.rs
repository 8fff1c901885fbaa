//! Sandbox operations
//!
//! Create, delete, list, display and count primitives constrained to the
//! sandbox root, plus login/logout. Each one runs
//! gate → filesystem → metadata → audit.

pub mod count;
pub mod create;
pub mod delete;
pub mod display;
pub mod list;
pub mod results;
pub mod session;

pub use count::{CountMode, count_file};
pub use create::create_item;
pub use delete::delete_item;
pub use display::{DisplayMode, display_file_content};
pub use list::{ListOptions, list_directory};
pub use results::*;
pub use session::{login, logout, status};

use log::error;

use crate::error::Id1fsError;
use crate::sandbox::Sandbox;

/// Audits a failed operation and hands the error back for propagation
pub(crate) fn audit_failure(
    sandbox: &Sandbox,
    action: &str,
    context: &str,
    err: impl Into<Id1fsError>,
) -> Id1fsError {
    let err = err.into();
    error!("{action}: {context}: {err}");
    sandbox.audit().details(action, format!("{context}: {err}"));
    err
}
