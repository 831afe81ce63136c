//! Output module
//!
//! Streaming reporters and post-run formatters.

mod formatter;
mod reporter;

pub use formatter::{OutputFormat, ResultFormatter};
pub use reporter::{ConsoleReporter, NullReporter, RecordingReporter, ReportEvent, Reporter};
