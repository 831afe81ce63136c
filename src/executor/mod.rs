//! Test execution engine
//!
//! Sequential unit execution and the session that drives it.

mod runner;
mod unit;

pub use runner::{SessionState, TestSession};
pub use unit::UnitExecutor;
