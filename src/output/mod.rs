pub mod formatter;

pub use formatter::Formatter;

use crate::case::CaseRecord;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format a list of archived cases based on the specified format
pub fn format_cases(records: &[CaseRecord], format: OutputFormat) -> Result<String> {
    let formatter = Formatter::new(format);
    formatter.format_cases(records)
}
