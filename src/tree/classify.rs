//! Per-entry classification
//!
//! Turns one directory entry into one [`EntryRecord`]. Failures are folded
//! into the record so a single bad entry never aborts a crawl.

use std::ffi::OsStr;
use std::fs::{self, FileType};
use std::io;
use std::path::Path;

use super::record::{EntryRecord, EntryType};

/// Classify the entry `name` inside `parent`.
///
/// Uses a single non-following stat, so a symbolic link is reported as
/// `symlink` whatever it points at (dangling links included) and its size is
/// the link's own size.
pub fn classify(parent: &Path, name: &OsStr) -> EntryRecord {
    let path = parent.join(name);
    let display_name = name.to_string_lossy().into_owned();

    match fs::symlink_metadata(&path) {
        Ok(meta) => {
            EntryRecord::classified(display_name, path, entry_type_of(meta.file_type()), meta.len())
        }
        Err(e) => failure_record(display_name, &path, &e),
    }
}

/// Map a non-following file type onto the inventory type.
///
/// The link check comes first: on some platforms a link can also report
/// itself as a file or directory.
pub fn entry_type_of(file_type: FileType) -> EntryType {
    if file_type.is_symlink() {
        EntryType::Symlink
    } else if file_type.is_dir() {
        EntryType::Directory
    } else if file_type.is_file() {
        EntryType::File
    } else {
        EntryType::Other
    }
}

fn failure_record(name: String, path: &Path, err: &io::Error) -> EntryRecord {
    tracing::debug!(path = %path.display(), error = %err, "classification failed");
    match err.kind() {
        io::ErrorKind::PermissionDenied => EntryRecord::permission_denied(name, path),
        _ => EntryRecord::failed(name, path, describe(err)),
    }
}

/// Human-readable description of a stat failure, never empty.
fn describe(err: &io::Error) -> String {
    let text = err.to_string();
    if text.is_empty() {
        format!("{:?}", err.kind())
    } else {
        text
    }
}
