//! Bundled test suites
//!
//! Demonstration groups registered by the `unitrun` binary.
//!
//! ### Arithmetic
//! - number_addition
//! - number_division
//!
//! ### Accumulator
//! - starts_empty
//! - push_and_total
//! - checked_overflow

mod accumulator;
mod arithmetic;

pub use accumulator::{AccumulatorTests, Overflow};
pub use arithmetic::{divide, DivideByZero, ExampleTests};

use crate::catalog::Registry;

/// Catalog with every bundled group, in run order
pub fn catalog() -> Registry {
    let mut registry = Registry::new();
    registry
        .register::<ExampleTests>()
        .register::<AccumulatorTests>();
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogProvider;
    use crate::executor::TestSession;
    use crate::output::NullReporter;

    #[test]
    fn test_bundled_suites_pass() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 5);

        let summary = TestSession::new()
            .run_all(&catalog, &mut NullReporter)
            .unwrap();
        assert!(summary.is_all_passed(), "{summary}");
    }

    #[test]
    fn test_groups_resolve_by_name() {
        let catalog = catalog();
        assert!(catalog.find_group("ExampleTests").is_some());
        assert!(catalog.find_group("accumulatortests").is_some());
    }
}
