//! Line, word and character counter

use std::fs;
use std::io;

use crate::error::{Id1fsError, StorageError};
use crate::operations::audit_failure;
use crate::operations::results::CountResult;
use crate::sandbox::Sandbox;
use crate::storage::resolve_in_sandbox;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountMode {
    #[default]
    Lines,
    Words,
    Characters,
}

impl CountMode {
    pub fn label(self) -> &'static str {
        match self {
            CountMode::Lines => "lines",
            CountMode::Words => "words",
            CountMode::Characters => "characters",
        }
    }

    fn count(self, content: &str) -> usize {
        match self {
            CountMode::Lines => content.lines().count(),
            CountMode::Words => content.split_whitespace().count(),
            CountMode::Characters => content.chars().count(),
        }
    }
}

/// Counts lines, words or characters of a sandbox file
pub fn count_file(
    sandbox: &Sandbox,
    name: &str,
    mode: CountMode,
) -> Result<CountResult, Id1fsError> {
    let context = format!("Counting {} in '{name}'", mode.label());

    sandbox
        .gate()
        .require_login()
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    let path = resolve_in_sandbox(sandbox.root(), name)
        .map_err(|e| audit_failure(sandbox, "Error", &context, e))?;

    sandbox.audit().details(
        "Count",
        format!("File: {}, Mode: {}", path.display(), mode.label()),
    );

    let content = fs::read_to_string(&path).map_err(|e| {
        let err = match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            _ if path.is_dir() => StorageError::NotAFile(path.display().to_string()),
            _ => StorageError::IoError(path.clone(), e),
        };
        audit_failure(sandbox, "Error", &context, err)
    })?;

    Ok(CountResult {
        count: mode.count(&content),
        path,
        mode,
    })
}
