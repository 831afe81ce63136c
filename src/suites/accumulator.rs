//! Instance-method example group
//!
//! Each unit receives a fresh `AccumulatorTests`, so state set by one unit
//! is never visible to the next.

use thiserror::Error;

use crate::assertions::{BodyResult, Raised, TestContext};
use crate::catalog::{GroupTests, TestGroup};

#[derive(Error, Debug)]
#[error("Accumulator overflowed adding {0}")]
pub struct Overflow(u32);

#[derive(Debug, Default)]
pub struct AccumulatorTests {
    values: Vec<u32>,
}

impl AccumulatorTests {
    fn push(&mut self, value: u32) -> Result<u32, Raised> {
        let total = self.total().checked_add(value).ok_or(Overflow(value))?;
        self.values.push(value);
        Ok(total)
    }

    fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    fn starts_empty(&mut self, t: &mut TestContext<'_>) -> BodyResult {
        t.assert(self.values.is_empty(), "fresh instance should be empty");
        t.assert(self.total() == 0, "");
        self.push(5)?;
        Ok(())
    }

    fn push_and_total(&mut self, t: &mut TestContext<'_>) -> BodyResult {
        t.assert(self.values.is_empty(), "state leaked from a previous unit");
        self.push(2)?;
        self.push(3)?;
        t.assert(self.total() == 5, "total should add pushed values");
        Ok(())
    }

    fn checked_overflow(&mut self, t: &mut TestContext<'_>) -> BodyResult {
        self.push(u32::MAX)?;
        t.expect_throws_of_kind::<Overflow, _>(|| self.push(1), "");
        t.assert(self.values.len() == 1, "failed push must not store the value");
        Ok(())
    }
}

impl TestGroup for AccumulatorTests {
    fn title() -> Option<&'static str> {
        Some("Instance state is rebuilt for every unit")
    }

    fn register(tests: &mut GroupTests<'_, Self>) {
        tests
            .method("starts_empty", Self::starts_empty)
            .method("push_and_total", Self::push_and_total)
            .method("checked_overflow", Self::checked_overflow);
    }
}
