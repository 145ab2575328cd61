//! Worklist and directory listing used by the walker.
//!
//! The walk is iterative: pending directories sit in a [`Worklist`] instead of
//! on the call stack, so tree depth is bounded by heap, not stack size.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::config::Traversal;

/// A directory waiting to be listed, with the depth of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDir {
    pub path: PathBuf,
    pub depth: usize,
}

/// Pending directories, taken in depth-first or breadth-first order.
#[derive(Debug)]
pub struct Worklist {
    traversal: Traversal,
    pending: VecDeque<PendingDir>,
}

impl Worklist {
    pub fn new(traversal: Traversal) -> Self {
        Self {
            traversal,
            pending: VecDeque::new(),
        }
    }

    /// Queue the subdirectories discovered in one listing, in listing order.
    pub fn push_siblings(&mut self, dirs: Vec<PendingDir>) {
        match self.traversal {
            // Front-insert in reverse so the first sibling is popped first
            Traversal::DepthFirst => {
                for dir in dirs.into_iter().rev() {
                    self.pending.push_front(dir);
                }
            }
            Traversal::BreadthFirst => self.pending.extend(dirs),
        }
    }

    pub fn pop(&mut self) -> Option<PendingDir> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// List the names in `dir`, releasing the directory handle before returning.
///
/// Entries the OS fails to yield mid-listing carry no name and cannot be
/// recorded; they are logged and skipped.
pub fn read_entry_names(dir: &Path, sort: bool) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        match entry {
            Ok(entry) => names.push(entry.file_name()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
            }
        }
    }
    if sort {
        names.sort();
    }
    Ok(names)
}
