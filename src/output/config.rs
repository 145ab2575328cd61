//! Output configuration types

/// Shape of the rendered inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON array, two-space indented
    #[default]
    Json,
    /// JSON array on a single line
    Compact,
    /// One JSON object per line, written as records are discovered
    JsonLines,
}

impl OutputFormat {
    /// Whether records can be written before the walk finishes.
    pub fn is_streaming(&self) -> bool {
        matches!(self, OutputFormat::JsonLines)
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Colors for the human-readable statistics summary
    pub use_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            use_color: true,
        }
    }
}
