//! Failure records and the queue that collects them
//!
//! Records are produced by the assertion helpers and drained by the unit
//! executor once the unit has finished.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Width of the `Error message: ` label, used to align continuation lines
const MESSAGE_LABEL_WIDTH: usize = 15;

/// Category of a failed check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// `assert` saw a false condition
    Asserting,
    /// `expect_no_throw` saw the callable raise
    Thrown,
    /// `expect_throws` or `expect_throws_of_kind` saw the callable complete
    NotThrown,
    /// `expect_throws_of_kind` saw a different kind than the expected one
    WrongKind { actual: String, expected: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Asserting => write!(f, "Asserting error"),
            FailureKind::Thrown => write!(f, "Exception was thrown"),
            FailureKind::NotThrown => write!(f, "Exception wasn't thrown"),
            FailureKind::WrongKind { actual, expected } => {
                write!(f, "{actual} was thrown instead of {expected}")
            }
        }
    }
}

/// One captured assertion violation
///
/// The message is formatted once, at creation, with the caller context
/// already embedded. Records are never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    message: String,
    line: u32,
    unit: String,
    group: String,
}

impl FailureRecord {
    pub fn new(
        kind: &FailureKind,
        message: &str,
        line: u32,
        unit: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        let unit = unit.into();
        let group = group.into();
        let message = format_failure(kind, message.trim(), line, &unit, &group);

        Self {
            message,
            line,
            unit,
            group,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn group(&self) -> &str {
        &self.group
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn format_failure(kind: &FailureKind, message: &str, line: u32, unit: &str, group: &str) -> String {
    let mut output = format!("{kind} from caller {group}.{unit} on line {line}!!");

    if !message.is_empty() {
        let continuation = format!("\n\t\t{}", " ".repeat(MESSAGE_LABEL_WIDTH));
        output.push_str("\n\t\tError message: ");
        output.push_str(&message.replace('\n', &continuation));
    }

    output
}

/// FIFO queue of failure records
#[derive(Debug, Default)]
pub struct FailureSink {
    queue: VecDeque<FailureRecord>,
}

impl FailureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FailureRecord) {
        self.queue.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove every queued record, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = FailureRecord> + '_ {
        self.queue.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_message_without_user_text() {
        let record = FailureRecord::new(&FailureKind::Asserting, "  ", 12, "addition", "Math");
        assert_eq!(
            record.message(),
            "Asserting error from caller Math.addition on line 12!!"
        );
        assert_eq!(record.line(), 12);
        assert_eq!(record.unit(), "addition");
        assert_eq!(record.group(), "Math");
    }

    #[test]
    fn test_record_message_reindents_lines() {
        let record = FailureRecord::new(&FailureKind::Thrown, "first\nsecond", 3, "u", "G");
        assert_eq!(
            record.message(),
            "Exception was thrown from caller G.u on line 3!!\n\t\tError message: first\n\t\t               second"
        );
    }

    #[test]
    fn test_wrong_kind_names_both_kinds() {
        let kind = FailureKind::WrongKind {
            actual: "panic".to_string(),
            expected: "DivideByZero".to_string(),
        };
        assert_eq!(kind.to_string(), "panic was thrown instead of DivideByZero");
    }

    #[test]
    fn test_sink_is_fifo() {
        let mut sink = FailureSink::new();
        sink.push(FailureRecord::new(&FailureKind::Asserting, "one", 1, "u", "G"));
        sink.push(FailureRecord::new(&FailureKind::NotThrown, "two", 2, "u", "G"));
        assert_eq!(sink.len(), 2);

        let lines: Vec<u32> = sink.drain().map(|r| r.line()).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(sink.is_empty());
    }
}
