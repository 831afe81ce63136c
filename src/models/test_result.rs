//! Unit and session result models
//!
//! Defines unit status, per-unit reports and the session summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Pass,
    Fail,
    Error,
}

impl UnitStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitStatus::Pass => "✓",
            UnitStatus::Fail => "✗",
            UnitStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UnitStatus::Pass)
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Pass => write!(f, "PASS"),
            UnitStatus::Fail => write!(f, "FAIL"),
            UnitStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single unit execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitReport {
    pub name: String,
    pub group: String,
    pub status: UnitStatus,
    pub duration_ms: u64,
    /// Message of an error that escaped the body
    pub error: Option<String>,
    /// Formatted failure records, in the order the checks ran
    pub failures: Vec<String>,
}

impl UnitReport {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        error: Option<String>,
        failures: Vec<String>,
        duration_ms: u64,
    ) -> Self {
        let status = if error.is_some() {
            UnitStatus::Error
        } else if !failures.is_empty() {
            UnitStatus::Fail
        } else {
            UnitStatus::Pass
        };

        Self {
            name: name.into(),
            group: group.into(),
            status,
            duration_ms,
            error,
            failures,
        }
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for UnitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{} [{}ms]",
            self.status.symbol(),
            self.group,
            self.name,
            self.duration_ms
        )?;
        if let Some(error) = &self.error {
            write!(f, " - {error}")?;
        }
        if !self.failures.is_empty() {
            write!(f, " ({} failed checks)", self.failures.len())?;
        }
        Ok(())
    }
}

/// Summary of one session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<UnitReport>,
}

impl SessionSummary {
    pub fn new(started_at: DateTime<Utc>, results: Vec<UnitReport>) -> Self {
        let count = |status: UnitStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            started_at,
            total: results.len(),
            passed: count(UnitStatus::Pass),
            failed: count(UnitStatus::Fail),
            errors: count(UnitStatus::Error),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    /// Overall outcome: true only when every unit passed
    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Error: {}",
            self.total, self.passed, self.failed, self.errors
        )?;
        write!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
