//! TreeWalker - flat inventory of everything below a root

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CrawlError;

use super::classify::classify;
use super::config::WalkerConfig;
use super::record::EntryRecord;
use super::sink::RecordSink;
use super::traversal::{PendingDir, Worklist, read_entry_names};

/// Walks a directory tree and classifies every entry below the root.
///
/// Each entry is recorded once, when it is listed as a child of its parent.
/// Directories are then queued for listing; symbolic links never are.
#[derive(Debug, Default)]
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Collect the whole inventory in memory.
    pub fn walk(&self, root: &Path) -> Result<Vec<EntryRecord>, CrawlError> {
        let mut records = Vec::new();
        self.walk_into(root, &mut records)?;
        Ok(records)
    }

    /// Stream records into `sink` in discovery order; returns the record count.
    ///
    /// Root problems are reported before any record is emitted. Afterwards
    /// only a sink error can end the walk early.
    pub fn walk_into<S: RecordSink>(&self, root: &Path, mut sink: S) -> Result<usize, CrawlError> {
        let root = resolve_root(root)?;
        let names = read_entry_names(&root, self.config.sort_entries).map_err(|source| {
            CrawlError::UnreadableRoot {
                path: root.clone(),
                source,
            }
        })?;

        tracing::info!(root = %root.display(), "Scanning directory");

        let mut worklist = Worklist::new(self.config.traversal);
        let mut count = self.record_children(&root, names, 1, &mut sink, &mut worklist)?;

        while let Some(PendingDir { path, depth }) = worklist.pop() {
            let names = match read_entry_names(&path, self.config.sort_entries) {
                Ok(names) => names,
                Err(e) => {
                    // Already recorded as a child of its parent; just don't descend
                    tracing::warn!(dir = %path.display(), error = %e, "cannot list directory");
                    continue;
                }
            };
            tracing::debug!(
                dir = %path.display(),
                entries = names.len(),
                pending = worklist.len(),
                "listing directory"
            );
            count += self.record_children(&path, names, depth, &mut sink, &mut worklist)?;
        }

        debug_assert!(worklist.is_empty());
        sink.finish(count)?;
        tracing::info!(records = count, "Scan complete");
        Ok(count)
    }

    /// Classify every name in `dir`, emit the records, and queue subdirectories.
    fn record_children<S: RecordSink>(
        &self,
        dir: &Path,
        names: Vec<std::ffi::OsString>,
        depth: usize,
        sink: &mut S,
        worklist: &mut Worklist,
    ) -> Result<usize, CrawlError> {
        let descend = self.config.should_descend(depth);
        let mut subdirs = Vec::new();
        let mut count = 0;

        for name in names {
            let record = classify(dir, &name);
            if descend && record.is_dir() {
                subdirs.push(PendingDir {
                    path: record.path.clone(),
                    depth: depth + 1,
                });
            }
            sink.record(record)?;
            count += 1;
        }

        worklist.push_siblings(subdirs);
        Ok(count)
    }
}

/// Walk `root` with the default configuration.
pub fn walk(root: &Path) -> Result<Vec<EntryRecord>, CrawlError> {
    TreeWalker::default().walk(root)
}

/// Resolve `root` and make sure it can be listed, without walking it.
///
/// Returns the same errors [`TreeWalker::walk_into`] would report for the root,
/// so callers can fail before creating any output.
pub fn check_root(root: &Path) -> Result<PathBuf, CrawlError> {
    let resolved = resolve_root(root)?;
    fs::read_dir(&resolved).map_err(|source| CrawlError::UnreadableRoot {
        path: resolved.clone(),
        source,
    })?;
    Ok(resolved)
}

/// Canonicalize the root and check that it is a directory.
///
/// A symlink given as the root itself is followed; links found below it are not.
fn resolve_root(root: &Path) -> Result<PathBuf, CrawlError> {
    let resolved = root.canonicalize().map_err(|source| CrawlError::InvalidRoot {
        path: root.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(CrawlError::NotADirectory { path: resolved });
    }
    Ok(resolved)
}
