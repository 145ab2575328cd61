//! Inventory record types and their JSON shape

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

/// Message recorded for entries the crawler was not allowed to stat.
pub const PERMISSION_DENIED: &str = "Permission denied";

/// Classification of a single filesystem entry.
///
/// The first four variants describe what the entry is; the last two mark
/// entries whose metadata could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    File,
    Directory,
    Symlink,
    Other,
    PermissionError,
    Error,
}

impl EntryType {
    /// All variants, in serialization order.
    pub const ALL: [EntryType; 6] = [
        EntryType::File,
        EntryType::Directory,
        EntryType::Symlink,
        EntryType::Other,
        EntryType::PermissionError,
        EntryType::Error,
    ];

    /// The name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
            EntryType::Symlink => "symlink",
            EntryType::Other => "other",
            EntryType::PermissionError => "permission_error",
            EntryType::Error => "error",
        }
    }

    /// Whether this type marks a failed classification.
    pub fn is_failure(&self) -> bool {
        matches!(self, EntryType::PermissionError | EntryType::Error)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inventory entry, produced exactly once per entry the walk visits.
///
/// Serializes to `{"name", "path", "size", "type"}` plus `"error"` for
/// failed classifications. `size` is always emitted and is `null` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryRecord {
    /// Record for an entry whose metadata was read.
    pub fn classified(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        entry_type: EntryType,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: Some(size),
            entry_type,
            error: None,
        }
    }

    /// Record for an entry the crawler lacked permission to stat.
    pub fn permission_denied(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: None,
            entry_type: EntryType::PermissionError,
            error: Some(PERMISSION_DENIED.to_string()),
        }
    }

    /// Record for an entry whose stat failed for any other reason.
    pub fn failed(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size: None,
            entry_type: EntryType::Error,
            error: Some(error.into()),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// `PathBuf`'s own `Serialize` refuses non-UTF-8 paths, which would fail the
/// whole document over one odd file name.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
