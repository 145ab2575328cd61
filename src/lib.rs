//! dircrawl - recursive filesystem inventory
//!
//! Walks a directory tree and classifies every entry (file, directory,
//! symbolic link, other, or a failure case) into a flat list of
//! [`EntryRecord`]s, ready to be serialized as JSON.
//!
//! ```no_run
//! let records = dircrawl::walk(std::path::Path::new("/tmp"))?;
//! for record in &records {
//!     println!("{} {}", record.entry_type, record.path.display());
//! }
//! # Ok::<(), dircrawl::CrawlError>(())
//! ```

pub mod error;
pub mod output;
pub mod stats;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::CrawlError;
pub use output::{JsonLinesWriter, OutputConfig, OutputFormat, write_records};
pub use stats::{InventoryStats, StatsCollector, print_stats};
pub use tree::{
    EntryRecord, EntryType, RecordSink, Traversal, TreeWalker, WalkerConfig, check_root, classify,
    walk,
};
