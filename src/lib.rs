//! unitrun - minimal test discovery and execution harness
//!
//! Units are registered in a [`catalog::Registry`], executed one at a time by
//! an [`executor::TestSession`], and reported through an
//! [`output::Reporter`]. Assertion helpers on [`assertions::TestContext`]
//! record failures without stopping the unit, so every violated check in a
//! unit is reported.
//!
//! ```ignore
//! use unitrun::prelude::*;
//!
//! struct Math;
//!
//! impl TestGroup for Math {
//!     fn title() -> Option<&'static str> {
//!         Some("Math")
//!     }
//!
//!     fn register(tests: &mut GroupTests<'_, Self>) {
//!         tests.test("addition", |t| {
//!             t.assert(1 + 1 == 2, "");
//!             Ok(())
//!         });
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register::<Math>();
//! let summary = TestSession::new().run_all(&registry, &mut ConsoleReporter::stdout())?;
//! ```

pub mod assertions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod output;
pub mod suites;
pub mod utils;

pub use error::HarnessError;

/// Common imports for writing test groups
pub mod prelude {
    pub use crate::assertions::{BodyResult, Raised, TestContext};
    pub use crate::catalog::{CatalogProvider, GroupTests, Registry, TestGroup};
    pub use crate::executor::TestSession;
    pub use crate::output::{ConsoleReporter, Reporter};
}
