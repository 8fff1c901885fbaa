//! Display operation

use log::info;
use std::fs;
use std::io;

use crate::error::{Id1fsError, StorageError};
use crate::operations::audit_failure;
use crate::operations::results::{DisplayOutput, DisplayResult};
use crate::sandbox::Sandbox;
use crate::storage::resolve_in_sandbox;

/// How a file's content is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Raw,
    /// Every line prefixed with `<n>: `
    Numbered,
    LineCount,
    CharCount,
}

/// Shows a sandbox file's content, or its line or character count.
///
/// Containment is checked before the login gate, so a name resolving outside
/// the sandbox root is refused whatever the session state.
pub fn display_file_content(
    sandbox: &Sandbox,
    name: &str,
    mode: DisplayMode,
) -> Result<DisplayResult, Id1fsError> {
    let context = format!("Displaying '{name}'");

    let path = resolve_in_sandbox(sandbox.root(), name)
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    sandbox
        .gate()
        .require_login()
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    if path.is_dir() {
        return Err(audit_failure(
            sandbox,
            "Error",
            &context,
            StorageError::NotAFile(path.display().to_string()),
        ));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        let err = if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(path.display().to_string())
        } else {
            StorageError::IoError(path.clone(), e)
        };
        audit_failure(sandbox, "Error", &context, err)
    })?;

    let output = match mode {
        DisplayMode::Raw => DisplayOutput::Content(content),
        DisplayMode::Numbered => DisplayOutput::Numbered(number_lines(&content)),
        DisplayMode::LineCount => DisplayOutput::LineCount(content.lines().count()),
        DisplayMode::CharCount => DisplayOutput::CharCount(content.chars().count()),
    };

    sandbox.audit().details(
        "Display Content",
        format!("Content of file '{}' displayed.", path.display()),
    );
    info!("Displayed {} ({:?})", path.display(), mode);

    Ok(DisplayResult { path, output })
}

fn number_lines(content: &str) -> String {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{}: {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}
