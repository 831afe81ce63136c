//! Test session runner
//!
//! Drives one run over the catalog: prints group titles on transitions,
//! executes each unit and aggregates the overall outcome.

use chrono::Utc;
use std::cell::{Cell, RefCell};
use tracing::{info, warn};

use super::UnitExecutor;
use crate::catalog::{CatalogProvider, GroupId, TestUnit};
use crate::error::HarnessError;
use crate::models::{FailureSink, SessionSummary};
use crate::output::Reporter;

thread_local! {
    /// Set while any session runs on this thread
    static RUNNING: Cell<bool> = const { Cell::new(false) };
}

/// State shared by every run of a session
#[derive(Debug, Default)]
pub struct SessionState {
    sink: RefCell<FailureSink>,
}

/// Holds the thread's running flag; clears it on drop, including during unwinding
struct RunningGuard;

impl RunningGuard {
    fn acquire() -> Result<Self, HarnessError> {
        if RUNNING.with(|running| running.replace(true)) {
            return Err(HarnessError::AlreadyRunning);
        }
        Ok(Self)
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        RUNNING.with(|running| running.set(false));
    }
}

/// Sequential test session
///
/// Only one run may be active on a thread at a time. Starting any session
/// from inside a unit body returns [`HarnessError::AlreadyRunning`] without
/// running anything.
#[derive(Debug, Default)]
pub struct TestSession {
    state: SessionState,
}

impl TestSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently running on this thread
    pub fn is_running() -> bool {
        RUNNING.with(Cell::get)
    }

    /// Whether no failure records are queued; false while a run holds the sink
    pub fn is_sink_empty(&self) -> bool {
        self.state
            .sink
            .try_borrow()
            .map(|sink| sink.is_empty())
            .unwrap_or(false)
    }

    /// Run every unit the catalog provides
    pub fn run_all(
        &self,
        catalog: &dyn CatalogProvider,
        reporter: &mut dyn Reporter,
    ) -> Result<SessionSummary, HarnessError> {
        let _guard = RunningGuard::acquire()?;
        let units = catalog.units();
        self.run_units(catalog, units, reporter)
    }

    /// Run only the units owned by `group`
    pub fn run_group(
        &self,
        catalog: &dyn CatalogProvider,
        group: &GroupId,
        reporter: &mut dyn Reporter,
    ) -> Result<SessionSummary, HarnessError> {
        let _guard = RunningGuard::acquire()?;
        let units = catalog.units_in(group);
        self.run_units(catalog, units, reporter)
    }

    fn run_units(
        &self,
        catalog: &dyn CatalogProvider,
        units: Vec<&TestUnit>,
        reporter: &mut dyn Reporter,
    ) -> Result<SessionSummary, HarnessError> {
        info!("Starting test session with {} units", units.len());
        let started_at = Utc::now();

        let mut sink = self.state.sink.borrow_mut();
        if !sink.is_empty() {
            warn!("Failure sink not empty at session start; discarding {}", sink.len());
            sink.drain().for_each(drop);
        }

        let mut executor = UnitExecutor::new(&mut sink);
        let mut last_group: Option<GroupId> = None;
        let mut passed = true;
        let mut results = Vec::with_capacity(units.len());

        for unit in units {
            let group = unit.group();
            if last_group != Some(group) {
                last_group = Some(group);
                if let Some(title) = catalog.title(&group) {
                    reporter.group_title(title);
                }
            }

            let report = executor.run(unit, reporter);
            passed = passed && report.passed();
            results.push(report);
        }

        let summary = SessionSummary::new(started_at, results);
        reporter.summary(&summary);

        info!(
            "Test session {} - Pass: {}/{} ({:.1}%)",
            if passed { "passed" } else { "failed" },
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        Ok(summary)
    }
}
