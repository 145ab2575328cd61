//! Error types for crawl operations.
//!
//! Only whole-operation failures live here. Per-entry failures are data and
//! end up in [`EntryRecord`](crate::tree::EntryRecord) instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The root does not exist or cannot be resolved.
    #[error("Directory '{path}' does not exist or cannot be resolved: {source}")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The root resolves to something other than a directory.
    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// The root directory exists but its contents cannot be listed.
    #[error("cannot read directory '{path}': {source}")]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record sink refused a record (e.g. a closed output stream).
    #[error("failed to emit record: {source}")]
    Sink {
        #[from]
        source: io::Error,
    },
}
