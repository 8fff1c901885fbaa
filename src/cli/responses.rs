//! Human-readable responses
//!
//! Formats operation results for standard output.

use crate::error::Id1fsError;
use crate::operations::{
    CountResult, CreateResult, DeleteResult, DisplayOutput, DisplayResult, ListEntry, ListResult,
    SessionResult,
};
use crate::storage::ItemKind;

pub fn format_create(result: &CreateResult) -> String {
    let mut out = format!(
        "{} '{}' created successfully.",
        result.kind.label(),
        result.name
    );
    if result.overwrote {
        out.push_str("\nNote: an existing file was overwritten.");
    }
    push_warnings(&mut out, &result.warnings);
    out
}

pub fn format_delete(result: &DeleteResult) -> String {
    let mut out = format!(
        "{} '{}' deleted successfully.",
        result.kind.label(),
        result.path.display()
    );
    if let Some(backup) = &result.backup_path {
        out.push_str(&format!("\nBackup saved to '{}'.", backup.display()));
    }
    push_warnings(&mut out, &result.warnings);
    out
}

pub fn format_list(result: &ListResult) -> String {
    let mut lines = vec![format!("Contents of directory {}:", result.requested)];

    for entry in &result.entries {
        lines.push(format_entry(entry));
        if let Some(content) = &entry.content {
            lines.push(format!("    File content:\n{}", content.trim_end_matches('\n')));
        }
        for child in &entry.children {
            lines.push(format!("  {child}"));
        }
    }

    if let Some(count) = result.count {
        lines.push(format!("Number of entries: {count}"));
    }

    lines.join("\n")
}

fn format_entry(entry: &ListEntry) -> String {
    match &entry.details {
        Some(d) => {
            let type_char = if entry.kind == ItemKind::Directory { 'd' } else { '-' };
            format!(
                "{}{:04o} {} {} {} {} {} {}",
                type_char,
                d.mode & 0o7777,
                d.nlink,
                d.uid,
                d.gid,
                d.size,
                d.modified,
                entry.name
            )
        }
        None if entry.kind == ItemKind::Directory => format!("{} (directory)", entry.name),
        None => entry.name.clone(),
    }
}

pub fn format_display(result: &DisplayResult) -> String {
    match &result.output {
        DisplayOutput::Content(content) | DisplayOutput::Numbered(content) => {
            format!("File content:\n{}", content.trim_end_matches('\n'))
        }
        DisplayOutput::LineCount(n) => {
            format!("Number of lines in '{}': {}", result.path.display(), n)
        }
        DisplayOutput::CharCount(n) => {
            format!("Number of characters in '{}': {}", result.path.display(), n)
        }
    }
}

pub fn format_count(result: &CountResult) -> String {
    format!(
        "Number of {} in {}: {}",
        result.mode.label(),
        result.path.display(),
        result.count
    )
}

pub fn format_login(result: &SessionResult) -> String {
    if result.was_logged_in {
        "Login successful (session was already open).".into()
    } else {
        "Login successful!".into()
    }
}

pub fn format_logout(_result: &SessionResult) -> String {
    "Logout successful.".into()
}

pub fn format_status(result: &SessionResult) -> String {
    if result.logged_in {
        "Login status: on".into()
    } else {
        "Login status: off".into()
    }
}

pub fn format_error(err: &Id1fsError) -> String {
    format!("Error: {err}")
}

fn push_warnings(out: &mut String, warnings: &[String]) {
    for warning in warnings {
        out.push_str(&format!("\nWarning: {warning}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::EntryDetails;
    use std::path::PathBuf;

    #[test]
    fn test_format_long_entry() {
        let entry = ListEntry {
            name: "docs".into(),
            kind: ItemKind::Directory,
            details: Some(EntryDetails {
                mode: 0o40755,
                nlink: 2,
                uid: 1000,
                gid: 1000,
                size: 4096,
                modified: "2024-01-01 10:00:00".into(),
            }),
            content: None,
            children: vec![],
        };
        assert_eq!(
            format_entry(&entry),
            "d0755 2 1000 1000 4096 2024-01-01 10:00:00 docs"
        );
    }

    #[test]
    fn test_format_list_with_count_and_content() {
        let result = ListResult {
            path: PathBuf::from("/h"),
            requested: ".".into(),
            entries: vec![
                ListEntry {
                    name: "a.txt".into(),
                    kind: ItemKind::File,
                    details: None,
                    content: Some("hello\n".into()),
                    children: vec![],
                },
                ListEntry {
                    name: "d".into(),
                    kind: ItemKind::Directory,
                    details: None,
                    content: None,
                    children: vec!["x".into()],
                },
            ],
            count: Some(2),
        };
        assert_eq!(
            format_list(&result),
            "Contents of directory .:\na.txt\n    File content:\nhello\nd (directory)\n  x\nNumber of entries: 2"
        );
    }

    #[test]
    fn test_format_create_with_warning() {
        let result = CreateResult {
            name: "n.txt".into(),
            path: PathBuf::from("/h/n.txt"),
            kind: ItemKind::File,
            overwrote: true,
            warnings: vec!["bad metadata".into()],
        };
        let out = format_create(&result);
        assert!(out.starts_with("File 'n.txt' created successfully."));
        assert!(out.contains("overwritten"));
        assert!(out.ends_with("Warning: bad metadata"));
    }
}
