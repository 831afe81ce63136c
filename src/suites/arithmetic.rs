//! Arithmetic example group

use thiserror::Error;

use crate::assertions::{BodyResult, Raised, TestContext};
use crate::catalog::{GroupTests, TestGroup};

/// Integer division by zero
#[derive(Error, Debug)]
#[error("Attempted to divide by zero.")]
pub struct DivideByZero;

pub fn divide(a: i32, b: i32) -> Result<i32, Raised> {
    Ok(a.checked_div(b).ok_or(DivideByZero)?)
}

/// Showing example test structure
pub struct ExampleTests;

impl ExampleTests {
    fn number_addition(t: &mut TestContext<'_>) -> BodyResult {
        t.assert(1 + 1 == 2, "");
        t.assert(1 + 3 != 3, "");
        Ok(())
    }

    fn number_division(t: &mut TestContext<'_>) -> BodyResult {
        let zero = 0;

        t.expect_no_throw(|| Ok(1 + 1), "");
        t.expect_throws(|| divide(1, zero), "");
        t.expect_throws_of_kind::<DivideByZero, _>(|| divide(1, zero), "");
        Ok(())
    }
}

impl TestGroup for ExampleTests {
    fn title() -> Option<&'static str> {
        Some("Showing example test structure")
    }

    fn register(tests: &mut GroupTests<'_, Self>) {
        tests
            .test("number_addition", Self::number_addition)
            .test("number_division", Self::number_division);
    }
}
