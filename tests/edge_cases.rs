//! Edge case and error handling tests for dircrawl


use dircrawl::{EntryType, walk};
#[cfg(unix)]
use harness::permission_checks_unavailable;
use harness::{TestTree, assert_record_invariants, count_named, find, parse_records, run_dircrawl};

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[cfg(unix)]
#[test]
fn test_symlink_to_directory_not_traversed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.rs", "fn file() {}");
    tree.add_symlink("realdir", "linkdir");

    let records = walk(tree.path()).unwrap();
    assert_eq!(records.len(), 3, "{:?}", records);
    assert_eq!(find(&records, "linkdir").entry_type, EntryType::Symlink);
    assert_eq!(find(&records, "realdir").entry_type, EntryType::Directory);
    // Reached through realdir only
    assert_eq!(count_named(&records, "file.rs"), 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.rs", "fn file() {}");
    tree.add_symlink("..", "subdir/parent");

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &[]);
    assert!(success, "dircrawl should not hang on parent symlink");
    let records = parse_records(&stdout);
    assert_eq!(records.len(), 3);
    assert_eq!(find(&records, "parent").entry_type, EntryType::Symlink);
}

#[cfg(unix)]
#[test]
fn test_self_referential_symlink() {
    let tree = TestTree::new();
    tree.add_file("file.rs", "fn file() {}");
    tree.add_symlink("selfref", "selfref");

    let records = walk(tree.path()).unwrap();
    assert_eq!(records.len(), 2);
    let link = find(&records, "selfref");
    assert_eq!(link.entry_type, EntryType::Symlink);
    assert!(link.error.is_none());
}

#[cfg(unix)]
#[test]
fn test_broken_symlink() {
    let tree = TestTree::new();
    tree.add_file("real.rs", "fn real() {}");
    tree.add_symlink("nonexistent.rs", "broken_link.rs");

    let records = walk(tree.path()).unwrap();
    assert_record_invariants(&records);
    let link = find(&records, "broken_link.rs");
    assert_eq!(link.entry_type, EntryType::Symlink);
    assert_eq!(link.size, Some("nonexistent.rs".len() as u64));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_between_directories() {
    let tree = TestTree::new();
    tree.add_dir("a");
    tree.add_dir("b");
    tree.add_symlink("../b", "a/to_b");
    tree.add_symlink("../a", "b/to_a");

    let records = walk(tree.path()).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(count_named(&records, "to_a"), 1);
    assert_eq!(count_named(&records, "to_b"), 1);
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[cfg(unix)]
#[test]
fn test_unreadable_directory() {
    if permission_checks_unavailable("test_unreadable_directory") {
        return;
    }
    let tree = TestTree::new();
    tree.add_file("readable/file.rs", "fn readable() {}");
    tree.add_file("unreadable/hidden.rs", "fn hidden() {}");
    tree.add_file("unreadable/nested/more.rs", "fn more() {}");
    let _guard = tree.restrict("unreadable", 0o000);

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &[]);
    assert!(success, "dircrawl should handle unreadable directories");
    let records = parse_records(&stdout);

    // The directory itself is recorded from its parent's listing
    let locked = find(&records, "unreadable");
    assert_eq!(locked.entry_type, EntryType::Directory);
    assert_eq!(count_named(&records, "hidden.rs"), 0);
    assert_eq!(count_named(&records, "nested"), 0);

    // Siblings are still traversed
    assert_eq!(find(&records, "file.rs").entry_type, EntryType::File);
    assert_eq!(records.len(), 3);
}

#[cfg(unix)]
#[test]
fn test_unsearchable_directory_yields_permission_errors() {
    if permission_checks_unavailable("test_unsearchable_directory_yields_permission_errors") {
        return;
    }
    let tree = TestTree::new();
    tree.add_file("locked/secret", "classified");
    tree.add_file("locked/inner/deeper.txt", "x");
    // Listable but not searchable: names are visible, stat is refused
    let _guard = tree.restrict("locked", 0o600);

    let records = walk(tree.path()).unwrap();
    assert_record_invariants(&records);

    let secret = find(&records, "secret");
    assert_eq!(secret.entry_type, EntryType::PermissionError);
    assert_eq!(secret.size, None);
    assert_eq!(secret.error.as_deref(), Some("Permission denied"));

    // Type unknown, so never descended into
    assert_eq!(find(&records, "inner").entry_type, EntryType::PermissionError);
    assert_eq!(count_named(&records, "deeper.txt"), 0);
}

#[cfg(unix)]
#[test]
fn test_permission_error_json_shape() {
    if permission_checks_unavailable("test_permission_error_json_shape") {
        return;
    }
    let tree = TestTree::new();
    tree.add_file("locked/secret", "classified");
    let _guard = tree.restrict("locked", 0o600);

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &["--format", "jsonl"]);
    assert!(success);
    let line = stdout
        .lines()
        .find(|line| line.contains("\"secret\""))
        .expect("record for secret");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert!(value["size"].is_null());
    assert_eq!(value["type"], "permission_error");
    assert_eq!(value["error"], "Permission denied");
}

#[cfg(unix)]
#[test]
fn test_unreadable_root_fails() {
    if permission_checks_unavailable("test_unreadable_root_fails") {
        return;
    }
    let tree = TestTree::new();
    tree.add_file("root/file.txt", "x");
    let _guard = tree.restrict("root", 0o000);

    let (stdout, stderr, success) = run_dircrawl(tree.path(), &["root"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("cannot read directory"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_still_classified() {
    // Reading content is never attempted, so a mode-000 file stats fine
    let tree = TestTree::new();
    tree.add_file("private.txt", "12345");
    let _guard = tree.restrict("private.txt", 0o000);

    let records = walk(tree.path()).unwrap();
    let private = find(&records, "private.txt");
    assert_eq!(private.entry_type, EntryType::File);
    assert_eq!(private.size, Some(5));
}

// ============================================================================
// Special Entries and Filenames
// ============================================================================

#[cfg(unix)]
#[test]
fn test_socket_is_other() {
    use std::os::unix::net::UnixListener;

    let tree = TestTree::new();
    tree.add_file("regular", "r");
    let _listener = UnixListener::bind(tree.path().join("sock")).unwrap();

    let records = walk(tree.path()).unwrap();
    assert_eq!(find(&records, "sock").entry_type, EntryType::Other);
    assert_record_invariants(&records);
}

#[test]
fn test_filename_with_spaces() {
    let tree = TestTree::new();
    tree.add_file("file with spaces.rs", "x");
    tree.add_file("dir with spaces/nested.rs", "y");

    let records = walk(tree.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(find(&records, "dir with spaces").entry_type, EntryType::Directory);
    assert_eq!(find(&records, "file with spaces.rs").size, Some(1));
}

#[test]
fn test_filename_with_unicode() {
    let tree = TestTree::new();
    tree.add_file("日本語.rs", "x");
    tree.add_file("émoji_🎉.rs", "y");
    tree.add_file("中文目录/文件.rs", "z");

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &[]);
    assert!(success, "dircrawl should handle unicode filenames");
    let records = parse_records(&stdout);
    assert_eq!(records.len(), 4);
    assert_eq!(find(&records, "émoji_🎉.rs").entry_type, EntryType::File);
    assert_eq!(find(&records, "中文目录").entry_type, EntryType::Directory);
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_filename() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = TestTree::new();
    let name = OsStr::from_bytes(b"raw\xfename");
    std::fs::write(tree.path().join(name), "bytes").unwrap();

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &[]);
    assert!(success, "non-UTF-8 names must not break serialization");
    let records = parse_records(&stdout);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "raw\u{fffd}name");
    assert_eq!(records[0].size, Some(5));
}

#[test]
fn test_empty_file_has_zero_size() {
    let tree = TestTree::new();
    tree.add_file("empty.txt", "");

    let records = walk(tree.path()).unwrap();
    assert_eq!(find(&records, "empty.txt").size, Some(0));
}

#[test]
fn test_empty_directory_root() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) = run_dircrawl(tree.path(), &[]);
    assert!(success);
    assert_eq!(stdout, "[]\n");
}
