//! Session operations
//!
//! Login always succeeds: credential checking belongs to the external
//! account-management tooling, not to ID1FS.

use crate::error::Id1fsError;
use crate::operations::audit_failure;
use crate::operations::results::SessionResult;
use crate::sandbox::Sandbox;

/// Turns the login gate on
pub fn login(sandbox: &Sandbox) -> Result<SessionResult, Id1fsError> {
    switch(sandbox, true, "Login")
}

/// Turns the login gate off
pub fn logout(sandbox: &Sandbox) -> Result<SessionResult, Id1fsError> {
    switch(sandbox, false, "Logout")
}

/// Reports the current session state without changing it
pub fn status(sandbox: &Sandbox) -> SessionResult {
    let logged_in = sandbox.gate().is_logged_in();
    SessionResult {
        was_logged_in: logged_in,
        logged_in,
    }
}

fn switch(sandbox: &Sandbox, logged_in: bool, action: &str) -> Result<SessionResult, Id1fsError> {
    let was_logged_in = sandbox.gate().is_logged_in();

    if let Err(e) = sandbox.gate().set_logged_in(logged_in) {
        sandbox.audit().success(action, false);
        return Err(audit_failure(sandbox, "Error", action, e));
    }

    sandbox.audit().success(action, true);
    Ok(SessionResult {
        was_logged_in,
        logged_in,
    })
}
