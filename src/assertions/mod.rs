//! Non-fatal assertion helpers
//!
//! Every helper evaluates its check and, on violation, pushes exactly one
//! [`FailureRecord`] into the sink lent to the [`TestContext`]. Helpers never
//! raise, so the test body keeps running after a failed check.
//!
//! A "raise" is either a callable returning `Err(Raised)` or a panic; both
//! are caught here.
//!
//! ```ignore
//! fn division(t: &mut TestContext) -> BodyResult {
//!     t.assert(1 + 1 == 2, "");
//!     t.expect_throws_of_kind::<DivideByZero, _>(|| divide(1, 0), "");
//!     Ok(())
//! }
//! ```

mod raised;

pub use raised::{Raised, MESSAGE_KIND, PANIC_KIND};

use std::any;
use std::cell::Cell;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Once;

use crate::models::{FailureKind, FailureRecord, FailureSink};

/// What a test body returns; `Err` is an error that escaped the body
pub type BodyResult = Result<(), Raised>;

thread_local! {
    /// Set while this thread is inside [`catch_raised`]
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the current panic hook so panics caught by [`catch_raised`] stay silent
///
/// Panics on other threads, or outside a capture, still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Restores the thread's previous capture state on drop
struct Capture {
    outer: bool,
}

impl Capture {
    fn begin() -> Self {
        Self {
            outer: CAPTURING.with(|capturing| capturing.replace(true)),
        }
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        CAPTURING.with(|capturing| capturing.set(self.outer));
    }
}

/// Run a callable, turning a panic into a [`Raised`]
pub(crate) fn catch_raised<T>(f: impl FnOnce() -> Result<T, Raised>) -> Result<T, Raised> {
    install_quiet_hook();
    let caught = {
        let _capture = Capture::begin();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    match caught {
        Ok(result) => result,
        Err(payload) => Err(Raised::from_panic(payload)),
    }
}

/// Per-unit assertion context
///
/// Carries the running unit's identity and a mutable borrow of the failure
/// sink for the duration of that unit.
pub struct TestContext<'s> {
    unit: String,
    group: String,
    sink: &'s mut FailureSink,
}

impl<'s> TestContext<'s> {
    pub fn new(unit: impl Into<String>, group: impl Into<String>, sink: &'s mut FailureSink) -> Self {
        Self {
            unit: unit.into(),
            group: group.into(),
            sink,
        }
    }

    /// Context with no unit attached; records carry empty caller names
    pub fn detached(sink: &'s mut FailureSink) -> Self {
        Self::new(String::new(), String::new(), sink)
    }

    /// Number of failures currently queued in the sink
    pub fn failure_count(&self) -> usize {
        self.sink.len()
    }

    /// Record `Asserting error` when `condition` is false
    #[track_caller]
    pub fn assert(&mut self, condition: bool, msg: &str) {
        if !condition {
            self.log(FailureKind::Asserting, msg);
        }
    }

    /// Record `Exception was thrown` when `f` raises; the error is swallowed
    #[track_caller]
    pub fn expect_no_throw<T>(&mut self, f: impl FnOnce() -> Result<T, Raised>, msg: &str) {
        if let Err(raised) = catch_raised(f) {
            let msg = format!("{}\n{}", raised.message(), msg);
            self.log(FailureKind::Thrown, &msg);
        }
    }

    /// Record `Exception wasn't thrown` when `f` completes; any raise passes
    #[track_caller]
    pub fn expect_throws<T>(&mut self, f: impl FnOnce() -> Result<T, Raised>, msg: &str) {
        if catch_raised(f).is_ok() {
            self.log(FailureKind::NotThrown, msg);
        }
    }

    /// Expect `f` to raise an error of type `K`
    ///
    /// Completing normally records `Exception wasn't thrown`; raising any other
    /// kind records `<actual> was thrown instead of <K>`.
    #[track_caller]
    pub fn expect_throws_of_kind<K, T>(&mut self, f: impl FnOnce() -> Result<T, Raised>, msg: &str)
    where
        K: Error + 'static,
    {
        match catch_raised(f) {
            Ok(_) => self.log(FailureKind::NotThrown, msg),
            Err(raised) if raised.is::<K>() => {}
            Err(raised) => {
                let kind = FailureKind::WrongKind {
                    actual: raised.kind().to_string(),
                    expected: any::type_name::<K>().to_string(),
                };
                self.log(kind, msg);
            }
        }
    }

    #[track_caller]
    fn log(&mut self, kind: FailureKind, msg: &str) {
        let line = Location::caller().line();
        let record = FailureRecord::new(&kind, msg, line, &self.unit, &self.group);
        self.sink.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("Attempted to divide by zero.")]
    struct DivideByZero;

    #[derive(Debug, thiserror::Error)]
    #[error("overflow")]
    struct Overflow;

    fn divide(a: i32, b: i32) -> Result<i32, Raised> {
        Ok(a.checked_div(b).ok_or(DivideByZero)?)
    }

    fn records(sink: &mut FailureSink) -> Vec<FailureRecord> {
        sink.drain().collect()
    }

    #[test]
    fn test_assert_true_records_nothing() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("addition", "Math", &mut sink);
        t.assert(1 + 1 == 2, "");
        t.assert(1 + 3 != 3, "should hold");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_assert_false_records_once_with_call_site() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("addition", "Math", &mut sink);
        let line = line!() + 1;
        t.assert(false, "boom");
        assert_eq!(t.failure_count(), 1);

        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].line(), line);
        assert!(recorded[0].message().contains("Asserting error"));
        assert!(recorded[0].message().contains("boom"));
        assert!(recorded[0].message().contains("Math.addition"));
    }

    #[test]
    fn test_detached_context_stamps_empty_names() {
        let mut sink = FailureSink::new();
        TestContext::detached(&mut sink).assert(false, "");

        let recorded = records(&mut sink);
        assert_eq!(recorded[0].unit(), "");
        assert_eq!(recorded[0].group(), "");
        assert!(recorded[0].message().contains("from caller . on line"));
    }

    #[test]
    fn test_expect_no_throw() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_no_throw(|| Ok(1 + 1), "");
        assert_eq!(t.failure_count(), 0);

        t.expect_no_throw(|| divide(1, 0), "dividing");
        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].message().starts_with("Exception was thrown"));
        assert!(recorded[0].message().contains("Attempted to divide by zero."));
        assert!(recorded[0].message().contains("dividing"));
    }

    #[test]
    fn test_expect_no_throw_catches_panics() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_no_throw(|| -> Result<(), Raised> { panic!("exploded") }, "");

        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].message().contains("exploded"));
    }

    #[test]
    fn test_expect_throws() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_throws(|| divide(1, 0), "");
        t.expect_throws(|| Err::<(), _>(Raised::msg("any kind")), "");
        assert_eq!(t.failure_count(), 0);

        t.expect_throws(|| divide(4, 2), "");
        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].message().starts_with("Exception wasn't thrown"));
    }

    #[test]
    fn test_expect_throws_of_kind_matching() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_throws_of_kind::<DivideByZero, _>(|| divide(1, 0), "");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_expect_throws_of_kind_wrong_kind_names_both() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_throws_of_kind::<Overflow, _>(|| divide(1, 0), "");

        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        let message = recorded[0].message();
        assert!(message.contains(any::type_name::<DivideByZero>()));
        assert!(message.contains(&format!("instead of {}", any::type_name::<Overflow>())));
    }

    #[test]
    fn test_expect_throws_of_kind_not_thrown() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_throws_of_kind::<DivideByZero, _>(|| divide(6, 3), "");

        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].message().starts_with("Exception wasn't thrown"));
    }

    #[test]
    fn test_expect_throws_of_kind_panic_is_other_kind() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.expect_throws_of_kind::<DivideByZero, ()>(|| panic!("not a typed error"), "");

        let recorded = records(&mut sink);
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].message().starts_with("panic was thrown instead of"));
    }

    #[test]
    fn test_records_keep_check_order() {
        let mut sink = FailureSink::new();
        let mut t = TestContext::new("u", "G", &mut sink);
        t.assert(false, "first");
        t.expect_throws(|| Ok(()), "second");
        t.assert(true, "skipped");
        t.expect_no_throw(|| Err::<(), _>(Raised::msg("x")), "third");

        let messages: Vec<String> = records(&mut sink)
            .into_iter()
            .map(|r| r.message().to_string())
            .collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("first"));
        assert!(messages[1].contains("second"));
        assert!(messages[2].contains("third"));
    }

    #[test]
    fn test_capture_state_is_restored() {
        assert!(!CAPTURING.with(Cell::get));

        let inner = catch_raised(|| {
            let outer_capturing = CAPTURING.with(Cell::get);
            let nested: Result<(), Raised> = catch_raised(|| panic!("nested"));
            Ok((outer_capturing, CAPTURING.with(Cell::get), nested.is_err()))
        });
        assert_eq!(inner.unwrap(), (true, true, true));
        assert!(!CAPTURING.with(Cell::get));

        let raised: Result<(), Raised> = catch_raised(|| panic!("silenced"));
        assert_eq!(raised.unwrap_err().kind(), PANIC_KIND);
        assert!(!CAPTURING.with(Cell::get));
    }
}
