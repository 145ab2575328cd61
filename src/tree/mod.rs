//! Directory tree walking logic
//!
//! - `classify`: one directory entry in, one [`EntryRecord`] out, failures included
//! - `TreeWalker`: iterative walk that classifies every entry below a root
//! - `RecordSink`: where records go as they are discovered (a `Vec`, or a
//!   streaming writer from [`crate::output`])

mod classify;
mod config;
mod record;
mod sink;
mod traversal;
mod walker;

pub use classify::{classify, entry_type_of};
pub use config::{Traversal, WalkerConfig};
pub use record::{EntryRecord, EntryType, PERMISSION_DENIED};
pub use sink::RecordSink;
pub use walker::{TreeWalker, check_root, walk};
