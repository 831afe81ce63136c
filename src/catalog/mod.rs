//! Test catalog
//!
//! The session consumes units through [`CatalogProvider`]; how they are
//! discovered is up to the provider. [`Registry`] is the explicit
//! registration provider used by the binary.

mod registry;
mod unit;

pub use registry::{GroupTests, Registry, TestGroup};
pub use unit::{GroupId, TestBody, TestUnit};

/// Source of test units for a session
pub trait CatalogProvider {
    /// Every discoverable unit, in run order
    fn units(&self) -> Vec<&TestUnit>;

    /// Units owned by `group`, in the same relative order as [`units`](Self::units)
    fn units_in(&self, group: &GroupId) -> Vec<&TestUnit> {
        self.units()
            .into_iter()
            .filter(|unit| unit.group() == *group)
            .collect()
    }

    /// Display title of a group, if it has one
    fn title(&self, group: &GroupId) -> Option<&str>;

    /// Resolve a group from its display name
    fn find_group(&self, name: &str) -> Option<GroupId>;
}
