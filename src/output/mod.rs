//! Output formatting and writing functionality

mod formatters;
mod writers;

pub use self::writers::{OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::report::Report;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a command report into a string
    fn format(&self, report: &Report) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(formatters::format_report_text(report, self.use_colors, self.quiet))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        formatters::format_report_json(report)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
