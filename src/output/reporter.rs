//! Streaming report sinks
//!
//! The session and executor emit four classes of message: group titles,
//! unit start/result lines, failure details and the session summary.
//! A [`Reporter`] decides how each class is rendered.

use serde::Serialize;
use std::io::{self, Write};
use tracing::warn;

use crate::models::{FailureRecord, SessionSummary, UnitReport, UnitStatus};

const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Receiver of session progress
pub trait Reporter {
    /// A group with a title is about to run
    fn group_title(&mut self, title: &str);

    /// A unit is about to run
    fn unit_started(&mut self, name: &str);

    /// A unit finished; called before its failures are reported
    fn unit_finished(&mut self, report: &UnitReport);

    /// Failures drained after a unit, oldest first; never called empty
    fn failures(&mut self, records: &[FailureRecord]);

    /// Session finished
    fn summary(&mut self, summary: &SessionSummary);
}

/// Line-oriented console output
pub struct ConsoleReporter<W: Write> {
    out: W,
    colorize: bool,
    timing: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            colorize: true,
            timing: false,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Append each unit's duration to its result line
    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colorize {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&mut self, text: &str) {
        let result = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write report output: {}", e);
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn group_title(&mut self, title: &str) {
        let line = self.paint(CYAN, &format!("____{title}____"));
        self.emit(&format!("\n{line}\n"));
    }

    fn unit_started(&mut self, name: &str) {
        let text = self.paint(WHITE, &format!("Running test: {name}.."));
        self.emit(&text);
    }

    fn unit_finished(&mut self, report: &UnitReport) {
        let mut line = match (report.status, &report.error) {
            (UnitStatus::Error, Some(error)) => {
                self.paint(RED, &format!("\n\tError occurred: {error}"))
            }
            (UnitStatus::Pass, _) => self.paint(GREEN, "Success!"),
            _ => self.paint(RED, "Failed!"),
        };
        if self.timing {
            line.push_str(&format!(" [{}ms]", report.duration_ms));
        }
        line.push('\n');
        self.emit(&line);
    }

    fn failures(&mut self, records: &[FailureRecord]) {
        let mut text = String::new();
        for record in records {
            text.push_str(&self.paint(YELLOW, &format!("\n\t{}", record.message())));
            text.push('\n');
        }
        text.push('\n');
        self.emit(&text);
    }

    fn summary(&mut self, summary: &SessionSummary) {
        let line = if summary.is_all_passed() {
            self.paint(GREEN, "Tests passed.")
        } else {
            self.paint(RED, "Tests failed.")
        };
        self.emit(&format!("\n{line}\n"));
    }
}

/// Discards everything; used when the report is rendered after the run
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn group_title(&mut self, _title: &str) {}

    fn unit_started(&mut self, _name: &str) {}

    fn unit_finished(&mut self, _report: &UnitReport) {}

    fn failures(&mut self, _records: &[FailureRecord]) {}

    fn summary(&mut self, _summary: &SessionSummary) {}
}

/// One message received by a [`RecordingReporter`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent {
    GroupTitle { title: String },
    UnitStarted { name: String },
    UnitFinished { name: String, status: UnitStatus, error: Option<String> },
    Failure { message: String, line: u32 },
    Summary { passed: bool },
}

/// Keeps every message in arrival order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// Titles printed so far, in order
    pub fn titles(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::GroupTitle { title } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failure_messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Failure { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn group_title(&mut self, title: &str) {
        self.events.push(ReportEvent::GroupTitle {
            title: title.to_string(),
        });
    }

    fn unit_started(&mut self, name: &str) {
        self.events.push(ReportEvent::UnitStarted {
            name: name.to_string(),
        });
    }

    fn unit_finished(&mut self, report: &UnitReport) {
        self.events.push(ReportEvent::UnitFinished {
            name: report.name.clone(),
            status: report.status,
            error: report.error.clone(),
        });
    }

    fn failures(&mut self, records: &[FailureRecord]) {
        self.events
            .extend(records.iter().map(|record| ReportEvent::Failure {
                message: record.message().to_string(),
                line: record.line(),
            }));
    }

    fn summary(&mut self, summary: &SessionSummary) {
        self.events.push(ReportEvent::Summary {
            passed: summary.is_all_passed(),
        });
    }
}
