use std::fs;
use std::path::Path;

use id1fs::error::{AuthError, Id1fsError, StorageError};
use id1fs::operations::{
    self, DisplayMode, DisplayOutput, ListOptions, create_item, delete_item, display_file_content,
};
use id1fs::storage::ItemKind;
use id1fs::storage::filesystem::placeholder_content;
use id1fs::{Id1fsConfig, Sandbox};
use tempfile::TempDir;

// Helper to open a fresh sandbox under a temporary root
fn setup_sandbox() -> (TempDir, Sandbox) {
    let dir = tempfile::tempdir().unwrap();
    let sandbox = Sandbox::open(Id1fsConfig::for_root(dir.path())).unwrap();
    (dir, sandbox)
}

fn setup_logged_in() -> (TempDir, Sandbox) {
    let (dir, sandbox) = setup_sandbox();
    operations::login(&sandbox).unwrap();
    (dir, sandbox)
}

fn backup_names(sandbox: &Sandbox) -> Vec<String> {
    match fs::read_dir(sandbox.backups().root()) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn read_log(sandbox: &Sandbox) -> String {
    fs::read_to_string(sandbox.audit().path()).unwrap_or_default()
}

#[test]
fn test_notes_scenario() {
    let (_dir, sandbox) = setup_logged_in();
    assert!(sandbox.metadata().load().records.is_empty());

    create_item(&sandbox, "notes.txt", ItemKind::File).unwrap();

    let records = sandbox.metadata().load().records;
    assert_eq!(records.len(), 1);
    let record = &records["notes.txt"];
    assert_eq!(record.size, placeholder_content("notes.txt").len() as u64);
    assert!(!record.is_directory);

    delete_item(&sandbox, "notes.txt", ItemKind::File).unwrap();

    let backups = backup_names(&sandbox);
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("notes.txt_"));
    assert!(sandbox.metadata().load().records.is_empty());
}

#[test]
fn test_create_then_display_returns_placeholder() {
    let (_dir, sandbox) = setup_logged_in();
    for name in ["a.txt", "with space.md", "unicode-é.txt"] {
        create_item(&sandbox, name, ItemKind::File).unwrap();
        let shown = display_file_content(&sandbox, name, DisplayMode::Raw).unwrap();
        assert_eq!(shown.output, DisplayOutput::Content(placeholder_content(name)));
    }
}

#[test]
fn test_created_then_deleted_leaves_no_record() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "dir", ItemKind::Directory).unwrap();
    create_item(&sandbox, "dir/file.txt", ItemKind::File).unwrap();
    create_item(&sandbox, "top.txt", ItemKind::File).unwrap();

    delete_item(&sandbox, "dir/file.txt", ItemKind::File).unwrap();
    delete_item(&sandbox, "dir", ItemKind::Directory).unwrap();
    delete_item(&sandbox, "top.txt", ItemKind::File).unwrap();

    assert!(sandbox.metadata().load().records.is_empty());
    let backups = backup_names(&sandbox);
    assert_eq!(backups.len(), 2);
    assert!(backups.iter().any(|b| b.starts_with("dir_file.txt_")));
    assert!(backups.iter().any(|b| b.starts_with("top.txt_")));
}

#[test]
fn test_deleting_parent_directory_drops_child_records() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "docs", ItemKind::Directory).unwrap();
    create_item(&sandbox, "docs/a.txt", ItemKind::File).unwrap();

    delete_item(&sandbox, "docs", ItemKind::Directory).unwrap();

    assert!(!sandbox.root().join("docs/a.txt").exists());
    assert!(sandbox.metadata().load().records.is_empty());
}

#[test]
fn test_repeated_deletes_keep_every_backup() {
    let (_dir, sandbox) = setup_logged_in();
    for content in ["version one", "version two"] {
        let created = create_item(&sandbox, "n.txt", ItemKind::File).unwrap();
        fs::write(&created.path, content).unwrap();
        delete_item(&sandbox, "n.txt", ItemKind::File).unwrap();
    }

    let mut contents: Vec<String> = backup_names(&sandbox)
        .iter()
        .map(|name| fs::read_to_string(sandbox.backups().root().join(name)).unwrap())
        .collect();
    contents.sort();
    assert_eq!(contents, vec!["version one", "version two"]);
}

#[cfg(unix)]
#[test]
fn test_delete_through_symlink_keeps_target() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "real.txt", ItemKind::File).unwrap();
    std::os::unix::fs::symlink(sandbox.root().join("real.txt"), sandbox.root().join("alias"))
        .unwrap();

    let result = delete_item(&sandbox, "alias", ItemKind::File).unwrap();
    assert_eq!(result.name, "alias");
    assert!(sandbox.root().join("real.txt").is_file());
    assert!(fs::symlink_metadata(sandbox.root().join("alias")).is_err());
    assert!(sandbox.metadata().load().records.contains_key("real.txt"));
    assert!(backup_names(&sandbox).is_empty());
}

#[test]
fn test_logged_out_mutations_change_nothing() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "keep.txt", ItemKind::File).unwrap();
    operations::logout(&sandbox).unwrap();
    let before = fs::read_to_string(sandbox.metadata().path()).unwrap();

    let err = create_item(&sandbox, "new.txt", ItemKind::File).unwrap_err();
    assert!(matches!(err, Id1fsError::Auth(AuthError::NotLoggedIn)));
    assert!(!sandbox.root().join("new.txt").exists());

    let err = delete_item(&sandbox, "keep.txt", ItemKind::File).unwrap_err();
    assert!(matches!(err, Id1fsError::Auth(AuthError::NotLoggedIn)));
    assert!(sandbox.root().join("keep.txt").exists());

    let err = create_item(&sandbox, "newdir", ItemKind::Directory).unwrap_err();
    assert!(matches!(err, Id1fsError::Auth(AuthError::NotLoggedIn)));

    assert_eq!(fs::read_to_string(sandbox.metadata().path()).unwrap(), before);
    assert!(backup_names(&sandbox).is_empty());
    assert!(read_log(&sandbox).contains("Action: Error"));
}

#[test]
fn test_traversal_never_prints_foreign_content() {
    let (dir, sandbox) = setup_sandbox();
    let secret = dir.path().join("secret.txt");
    fs::write(&secret, "top secret").unwrap();

    for logged_in in [false, true] {
        sandbox.gate().set_logged_in(logged_in).unwrap();
        for name in [
            "../../etc/passwd",
            "../secret.txt",
            secret.to_str().unwrap(),
            "sub/../../secret.txt",
        ] {
            let err = display_file_content(&sandbox, name, DisplayMode::Raw).unwrap_err();
            assert!(
                matches!(err, Id1fsError::Storage(StorageError::PathEscape(_))),
                "{name} should be rejected, got {err:?}"
            );
        }
    }

    assert!(!read_log(&sandbox).contains("top secret"));
}

#[cfg(unix)]
#[test]
fn test_symlink_escape_rejected_for_display() {
    let (dir, sandbox) = setup_logged_in();
    fs::write(dir.path().join("outside.txt"), "outside").unwrap();
    std::os::unix::fs::symlink(dir.path().join("outside.txt"), sandbox.root().join("link.txt"))
        .unwrap();

    let err = display_file_content(&sandbox, "link.txt", DisplayMode::Raw).unwrap_err();
    assert!(matches!(err, Id1fsError::Storage(StorageError::PathEscape(_))));
}

#[test]
fn test_directory_create_is_idempotent() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "projects", ItemKind::Directory).unwrap();
    create_item(&sandbox, "projects", ItemKind::Directory).unwrap();

    let records = sandbox.metadata().load().records;
    assert_eq!(records.len(), 1);
    assert!(records["projects"].is_directory);
}

#[test]
fn test_malformed_metadata_replaced_on_create() {
    let (_dir, sandbox) = setup_logged_in();
    let metadata_path = sandbox.metadata().path().to_path_buf();
    fs::create_dir_all(metadata_path.parent().unwrap()).unwrap();
    fs::write(&metadata_path, "{{{ not json").unwrap();

    let result = create_item(&sandbox, "fresh.txt", ItemKind::File).unwrap();
    assert_eq!(result.warnings.len(), 1);

    let loaded = sandbox.metadata().load();
    assert!(loaded.warning.is_none());
    assert_eq!(loaded.records.len(), 1);
    assert!(loaded.records.contains_key("fresh.txt"));
}

#[test]
fn test_list_reflects_created_items() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "a", ItemKind::Directory).unwrap();
    create_item(&sandbox, "b.txt", ItemKind::File).unwrap();

    let options = ListOptions {
        count: true,
        ..Default::default()
    };
    let listing = operations::list_directory(&sandbox, ".", options).unwrap();
    let names: Vec<_> = listing.entries.iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["a".to_string(), "b.txt".to_string()]);
    assert_eq!(listing.count, Some(2));
}

#[test]
fn test_audit_log_records_history() {
    let (_dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "h.txt", ItemKind::File).unwrap();
    delete_item(&sandbox, "h.txt", ItemKind::File).unwrap();
    let _ = delete_item(&sandbox, "h.txt", ItemKind::File);
    operations::logout(&sandbox).unwrap();

    let log = read_log(&sandbox);
    let order = [
        "Action: Login\n",
        "Action: Metadata\n",
        "Action: File Creation\n",
        "Action: Backup\n",
        "Action: File Deletion\n",
        "Action: Metadata Removal\n",
        "Action: File Deletion Error\n",
        "Action: Logout\n",
    ];
    let mut cursor = 0;
    for action in order {
        let found = log[cursor..]
            .find(action)
            .unwrap_or_else(|| panic!("missing {action:?} after offset {cursor}"));
        cursor += found + action.len();
    }
}

#[test]
fn test_layout_under_root() {
    let (dir, sandbox) = setup_logged_in();
    create_item(&sandbox, "x.txt", ItemKind::File).unwrap();
    delete_item(&sandbox, "x.txt", ItemKind::File).unwrap();

    let root: &Path = dir.path();
    assert!(root.join("home").is_dir());
    assert!(root.join("metadata/metadata.json").is_file());
    assert!(root.join("metadata/login_status.json").is_file());
    assert!(root.join("log/execution_log.txt").is_file());
    assert!(root.join("backup").is_dir());
}
