//! Explicit-registration test catalog
//!
//! Groups implement [`TestGroup`] and list their units in `register`;
//! the registry keeps registration order.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::{CatalogProvider, GroupId, TestBody, TestUnit};
use crate::assertions::{BodyResult, TestContext};

/// A group of test units, typically one type per test file
pub trait TestGroup: 'static {
    /// Display title printed before the group's units
    fn title() -> Option<&'static str> {
        None
    }

    /// Add this group's units in the order they should run
    fn register(tests: &mut GroupTests<'_, Self>)
    where
        Self: Sized;
}

/// Unit builder handed to [`TestGroup::register`]
pub struct GroupTests<'r, G> {
    registry: &'r mut Registry,
    group: GroupId,
    _group: std::marker::PhantomData<fn() -> G>,
}

impl<G: 'static> GroupTests<'_, G> {
    /// Add a unit that runs without a group instance
    pub fn test<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: Fn(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.registry
            .push(TestUnit::new(self.group, name, TestBody::from_fn(body)));
        self
    }

    /// Add a unit that runs against a fresh `G::default()` instance
    pub fn method<F>(&mut self, name: &str, method: F) -> &mut Self
    where
        G: Default,
        F: Fn(&mut G, &mut TestContext<'_>) -> BodyResult + 'static,
    {
        self.registry.push(TestUnit::new(
            self.group,
            name,
            TestBody::from_method(G::default, method),
        ));
        self
    }
}

/// Ordered collection of registered units
#[derive(Default)]
pub struct Registry {
    units: Vec<TestUnit>,
    titles: HashMap<GroupId, &'static str>,
    groups: Vec<GroupId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every unit of group `G`
    pub fn register<G: TestGroup>(&mut self) -> &mut Self {
        let group = GroupId::of::<G>();
        self.add_group(group);
        if let Some(title) = G::title() {
            self.titles.insert(group, title);
        }

        let before = self.units.len();
        G::register(&mut GroupTests {
            registry: &mut *self,
            group,
            _group: std::marker::PhantomData,
        });
        debug!(
            "Registered {} units for group {}",
            self.units.len() - before,
            group
        );

        self
    }

    /// Add a single unit; its group is created untitled if unknown
    pub fn push(&mut self, unit: TestUnit) {
        self.add_group(unit.group());
        self.units.push(unit);
    }

    fn add_group(&mut self, group: GroupId) {
        if self.groups.contains(&group) {
            return;
        }
        if self.groups.iter().any(|g| g.name() == group.name()) {
            warn!(
                "Group name {} is registered more than once; selecting it by name picks the first",
                group
            );
        }
        self.groups.push(group);
    }

    /// Groups in first-registration order
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl CatalogProvider for Registry {
    fn units(&self) -> Vec<&TestUnit> {
        self.units.iter().collect()
    }

    fn title(&self, group: &GroupId) -> Option<&str> {
        self.titles.get(group).copied()
    }

    fn find_group(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
            .copied()
    }
}
