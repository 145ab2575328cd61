//! Record sinks - where a walk delivers its records

use std::io;

use super::record::EntryRecord;

/// Receives records in discovery order as a walk produces them.
///
/// A walk owns exactly one sink for its lifetime. An error from the sink
/// aborts the walk; classification failures never reach it as errors.
pub trait RecordSink {
    fn record(&mut self, record: EntryRecord) -> io::Result<()>;

    /// Called once after the last record. Defaults to a no-op.
    fn finish(&mut self, _count: usize) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory inventory.
impl RecordSink for Vec<EntryRecord> {
    fn record(&mut self, record: EntryRecord) -> io::Result<()> {
        self.push(record);
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn record(&mut self, record: EntryRecord) -> io::Result<()> {
        (**self).record(record)
    }

    fn finish(&mut self, count: usize) -> io::Result<()> {
        (**self).finish(count)
    }
}
