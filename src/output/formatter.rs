//! Output formatters for session results
//!
//! `text` streams through [`ConsoleReporter`](super::ConsoleReporter); the
//! other formats render the finished [`SessionSummary`].

use serde::{Deserialize, Serialize};

use crate::models::{SessionSummary, UnitReport, UnitStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    /// Whether results are printed while the session runs
    pub fn is_streaming(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a finished session
    ///
    /// Returns an empty string for `text`, which was already streamed.
    pub fn format_summary(&self, summary: &SessionSummary) -> String {
        match self.format {
            OutputFormat::Text => String::new(),
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_result_row(&self, result: &UnitReport) -> String {
        let status = format!("{} {}", result.status.symbol(), result.status);
        let status = if self.colorize {
            match result.status {
                UnitStatus::Pass => format!("\x1b[32m{status}\x1b[0m"),
                UnitStatus::Fail | UnitStatus::Error => format!("\x1b[31m{status}\x1b[0m"),
            }
        } else {
            status
        };

        format!(
            "{:20} {:28} {} [{:>6}ms]",
            result.group, result.name, status, result.duration_ms
        )
    }

    fn format_summary_table(&self, summary: &SessionSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nTest session started {}\n",
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        for result in &summary.results {
            output.push_str(&self.format_result_row(result));
            output.push('\n');
            if let Some(error) = &result.error {
                output.push_str(&format!("    error: {error}\n"));
            }
            for failure in &result.failures {
                output.push_str(&format!("    {}\n", failure.replace('\n', "\n    ")));
            }
        }

        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        output.push_str(&format!(
            "Total: {} | Pass: {} | Fail: {} | Error: {}\n",
            summary.total, summary.passed, summary.failed, summary.errors
        ));
        output.push_str(&format!(
            "Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));

        output
    }

    fn format_summary_brief(&self, summary: &SessionSummary) -> String {
        let verdict = if summary.is_all_passed() {
            "passed"
        } else {
            "failed"
        };
        format!(
            "Tests {}: {}/{} units passed ({:.1}%) in {}ms",
            verdict,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}
