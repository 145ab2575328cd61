//! Inventory statistics collection and display
//!
//! Aggregates records into counts per entry type plus the total size of
//! regular files. The collector is a [`RecordSink`], so a summary can be
//! produced without keeping the inventory in memory.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{EntryRecord, EntryType, RecordSink};

/// Collected statistics about one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    /// Total number of records
    pub entries: usize,
    pub files: usize,
    pub directories: usize,
    pub symlinks: usize,
    pub other: usize,
    pub permission_errors: usize,
    pub errors: usize,
    /// Sum of regular file sizes in bytes
    pub total_file_bytes: u64,
}

impl InventoryStats {
    /// Count for a single entry type.
    pub fn count(&self, entry_type: EntryType) -> usize {
        match entry_type {
            EntryType::File => self.files,
            EntryType::Directory => self.directories,
            EntryType::Symlink => self.symlinks,
            EntryType::Other => self.other,
            EntryType::PermissionError => self.permission_errors,
            EntryType::Error => self.errors,
        }
    }

    /// Entries that could not be classified.
    pub fn failures(&self) -> usize {
        self.permission_errors + self.errors
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EntryRecord>) -> Self {
        let mut collector = StatsCollector::new();
        for record in records {
            collector.add(record);
        }
        collector.finalize()
    }
}

/// Statistics collector that accumulates data during a walk.
#[derive(Debug, Default)]
pub struct StatsCollector {
    stats: InventoryStats,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry in the statistics.
    pub fn add(&mut self, record: &EntryRecord) {
        let stats = &mut self.stats;
        stats.entries += 1;
        match record.entry_type {
            EntryType::File => {
                stats.files += 1;
                stats.total_file_bytes += record.size.unwrap_or(0);
            }
            EntryType::Directory => stats.directories += 1,
            EntryType::Symlink => stats.symlinks += 1,
            EntryType::Other => stats.other += 1,
            EntryType::PermissionError => stats.permission_errors += 1,
            EntryType::Error => stats.errors += 1,
        }
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self) -> InventoryStats {
        self.stats
    }
}

impl RecordSink for StatsCollector {
    fn record(&mut self, record: EntryRecord) -> io::Result<()> {
        self.add(&record);
        Ok(())
    }
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Write the summary to any color-capable writer.
pub fn write_stats<W: WriteColor>(out: &mut W, stats: &InventoryStats) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "Inventory Statistics")?;
    out.reset()?;
    writeln!(out, "────────────────────")?;

    writeln!(out, "Entries:      {} total", format_number(stats.entries))?;
    writeln!(
        out,
        "Files:        {} ({})",
        format_number(stats.files),
        format_size(stats.total_file_bytes)
    )?;
    writeln!(out, "Directories:  {}", format_number(stats.directories))?;
    writeln!(out, "Symlinks:     {}", format_number(stats.symlinks))?;
    writeln!(out, "Other:        {}", format_number(stats.other))?;

    if stats.failures() > 0 {
        writeln!(out)?;
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow)).set_bold(true);
        out.set_color(&warn)?;
        writeln!(out, "Unclassified:")?;
        out.reset()?;
        writeln!(
            out,
            "  {:<18}{}",
            "permission_error",
            format_number(stats.permission_errors)
        )?;
        writeln!(out, "  {:<18}{}", "error", format_number(stats.errors))?;
    }

    Ok(())
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &InventoryStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    write_stats(&mut stdout, stats)
}
