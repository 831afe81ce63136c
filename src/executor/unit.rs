//! Single-unit execution
//!
//! Runs one unit body, separates errors that escape the body from failures
//! captured by the assertion helpers, and drains the sink afterwards.

use tracing::{debug, info, warn};

use crate::assertions::{catch_raised, BodyResult, TestContext};
use crate::catalog::{TestBody, TestUnit};
use crate::models::{FailureRecord, FailureSink, UnitReport};
use crate::output::Reporter;
use crate::utils::Timer;

/// Executes units against a borrowed failure sink
pub struct UnitExecutor<'s> {
    sink: &'s mut FailureSink,
}

impl<'s> UnitExecutor<'s> {
    pub fn new(sink: &'s mut FailureSink) -> Self {
        Self { sink }
    }

    /// Run one unit and report it
    ///
    /// Only records added while the body ran belong to the unit; anything
    /// already queued is discarded. The sink is empty when this returns,
    /// whether or not the body raised.
    pub fn run(&mut self, unit: &TestUnit, reporter: &mut dyn Reporter) -> UnitReport {
        let group = unit.group();
        debug!("Running {}.{}", group, unit.name());
        reporter.unit_started(unit.name());
        let timer = Timer::start(format!("{}.{}", group, unit.name()));

        let before = self.sink.len();
        let result = {
            let mut t = TestContext::new(unit.name(), group.name(), &mut *self.sink);
            catch_raised(|| invoke(unit.body(), &mut t))
        };
        let duration_ms = timer.stop_ms();

        let error = match result {
            Ok(()) => None,
            Err(raised) => {
                info!("{}.{} raised {}: {}", group, unit.name(), raised.kind(), raised);
                Some(raised.message().to_string())
            }
        };

        if before > 0 {
            warn!(
                "Discarding {} stale failures queued before {}.{}",
                before,
                group,
                unit.name()
            );
        }
        let records: Vec<FailureRecord> = if self.sink.len() > before {
            self.sink.drain().skip(before).collect()
        } else {
            self.sink.drain().for_each(drop);
            Vec::new()
        };
        debug!(
            "{}.{} finished with {} failed checks",
            group,
            unit.name(),
            records.len()
        );

        let failures = records.iter().map(|r| r.message().to_string()).collect();
        let report = UnitReport::new(unit.name(), group.name(), error, failures, duration_ms);

        reporter.unit_finished(&report);
        if !records.is_empty() {
            reporter.failures(&records);
        }

        report
    }
}

fn invoke(body: &TestBody, t: &mut TestContext<'_>) -> BodyResult {
    match body {
        TestBody::Static(body) => body(t),
        TestBody::Instance { factory, method } => {
            let mut instance = factory();
            method(instance.as_mut(), t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::Raised;
    use crate::catalog::GroupId;
    use crate::models::UnitStatus;
    use crate::output::{RecordingReporter, ReportEvent};

    struct Math;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    fn unit(name: &str, body: TestBody) -> TestUnit {
        TestUnit::new(GroupId::of::<Math>(), name, body)
    }

    fn run(unit: &TestUnit) -> (UnitReport, RecordingReporter, FailureSink) {
        let mut sink = FailureSink::new();
        let mut reporter = RecordingReporter::new();
        let report = UnitExecutor::new(&mut sink).run(unit, &mut reporter);
        (report, reporter, sink)
    }

    #[test]
    fn test_passing_unit() {
        let (report, reporter, sink) = run(&unit(
            "addition",
            TestBody::from_fn(|t| {
                t.assert(1 + 1 == 2, "");
                t.assert(1 + 3 != 3, "");
                Ok(())
            }),
        ));

        assert_eq!(report.status, UnitStatus::Pass);
        assert!(report.failures.is_empty());
        assert!(sink.is_empty());
        assert!(reporter.failure_messages().is_empty());
    }

    #[test]
    fn test_failed_check_marks_unit_failed() {
        let (report, reporter, sink) = run(&unit(
            "boom",
            TestBody::from_fn(|t| {
                t.assert(false, "boom");
                Ok(())
            }),
        ));

        assert_eq!(report.status, UnitStatus::Fail);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("Asserting error"));
        assert!(report.failures[0].contains("boom"));
        assert!(report.failures[0].contains("Math.boom"));
        assert!(sink.is_empty());
        assert_eq!(reporter.failure_messages(), vec![report.failures[0].as_str()]);
    }

    #[test]
    fn test_raised_error_is_reported_separately() {
        let (report, reporter, sink) = run(&unit(
            "raises",
            TestBody::from_fn(|_| Err(Raised::msg("Unknown test method declaring type"))),
        ));

        assert_eq!(report.status, UnitStatus::Error);
        assert_eq!(
            report.error.as_deref(),
            Some("Unknown test method declaring type")
        );
        assert!(report.failures.is_empty());
        assert!(sink.is_empty());
        assert!(matches!(
            reporter.events().last(),
            Some(ReportEvent::UnitFinished { status: UnitStatus::Error, .. })
        ));
    }

    #[test]
    fn test_raise_after_failed_checks_keeps_both() {
        let (report, reporter, sink) = run(&unit(
            "both",
            TestBody::from_fn(|t| {
                t.assert(false, "first");
                t.assert(false, "second");
                Err(Raised::msg("late"))
            }),
        ));

        assert_eq!(report.status, UnitStatus::Error);
        assert_eq!(report.error.as_deref(), Some("late"));
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].contains("first"));
        assert!(report.failures[1].contains("second"));
        assert!(sink.is_empty());
        assert_eq!(reporter.failure_messages().len(), 2);
    }

    #[test]
    fn test_panicking_body_is_contained() {
        let (report, _, sink) = run(&unit(
            "panics",
            TestBody::from_fn(|t| {
                t.assert(false, "");
                panic!("body exploded");
            }),
        ));

        assert_eq!(report.status, UnitStatus::Error);
        assert_eq!(report.error.as_deref(), Some("body exploded"));
        assert_eq!(report.failures.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_instance_body_gets_fresh_instance() {
        let first = unit(
            "first",
            TestBody::from_method(Counter::default, |c: &mut Counter, t| {
                c.hits += 1;
                t.assert(c.hits == 1, "instance was reused");
                Ok(())
            }),
        );

        let mut sink = FailureSink::new();
        let mut reporter = RecordingReporter::new();
        let mut executor = UnitExecutor::new(&mut sink);
        assert!(executor.run(&first, &mut reporter).passed());
        assert!(executor.run(&first, &mut reporter).passed());
    }

    #[test]
    fn test_stale_failures_do_not_leak_into_unit() {
        let mut sink = FailureSink::new();
        TestContext::detached(&mut sink).assert(false, "left over");

        let passing = unit("clean", TestBody::from_fn(|_| Ok(())));
        let report = UnitExecutor::new(&mut sink).run(&passing, &mut RecordingReporter::new());
        assert!(report.passed());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_only_growth_is_attributed_to_unit() {
        let mut sink = FailureSink::new();
        TestContext::detached(&mut sink).assert(false, "left over");

        let failing = unit(
            "grows",
            TestBody::from_fn(|t| {
                assert_eq!(t.failure_count(), 1);
                t.assert(false, "fresh");
                Ok(())
            }),
        );
        let mut reporter = RecordingReporter::new();
        let report = UnitExecutor::new(&mut sink).run(&failing, &mut reporter);

        assert_eq!(report.status, UnitStatus::Fail);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("fresh"));
        assert!(report.failures[0].contains("Math.grows"));
        assert_eq!(reporter.failure_messages().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_event_order() {
        let (_, reporter, _) = run(&unit(
            "ordered",
            TestBody::from_fn(|t| {
                t.expect_throws(|| Ok(()), "");
                Ok(())
            }),
        ));

        let events = reporter.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], ReportEvent::UnitStarted { name } if name == "ordered"));
        assert!(matches!(
            &events[1],
            ReportEvent::UnitFinished { status: UnitStatus::Fail, .. }
        ));
        assert!(matches!(&events[2], ReportEvent::Failure { .. }));
    }
}
