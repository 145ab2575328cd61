//! Inventory formatting and display
//!
//! - `config` - Output configuration types
//! - `json` - JSON array and JSON Lines output

mod config;
mod json;

use std::io::{self, Write};

pub use config::{OutputConfig, OutputFormat};
pub use json::{JsonLinesWriter, write_json};

use crate::tree::EntryRecord;

/// Render a complete inventory in a non-streaming format.
///
/// JSON Lines is rendered too, one record per line, for callers that
/// already hold the records.
pub fn write_records<W: Write>(
    writer: W,
    records: &[EntryRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, records, true),
        OutputFormat::Compact => write_json(writer, records, false),
        OutputFormat::JsonLines => {
            use crate::tree::RecordSink;

            let mut sink = JsonLinesWriter::new(writer);
            for record in records {
                sink.record(record.clone())?;
            }
            sink.finish(records.len())
        }
    }
}
