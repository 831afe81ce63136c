//! Data models for test execution
//!
//! Failure records, the failure sink, and unit/session results.

mod failure;
mod test_result;

pub use failure::{FailureKind, FailureRecord, FailureSink};
pub use test_result::{SessionSummary, UnitReport, UnitStatus};
