//! JSON output formatting

use std::io::{self, Write};

use serde::Serialize;

use crate::tree::{EntryRecord, RecordSink};

/// Write `value` as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()
}

/// Streams records as JSON Lines: one compact object per line, in discovery order.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesWriter<W> {
    fn record(&mut self, record: EntryRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")
    }

    fn finish(&mut self, _count: usize) -> io::Result<()> {
        self.writer.flush()
    }
}
