//! Test units and group identities

use std::any::{self, Any, TypeId};
use std::fmt;

use crate::assertions::{BodyResult, Raised, TestContext};

/// Identity of the group that owns a unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId {
    type_id: TypeId,
    name: &'static str,
}

impl GroupId {
    pub fn of<G: 'static>() -> Self {
        let path = any::type_name::<G>();
        let base = path.split('<').next().unwrap_or(path);
        Self {
            type_id: TypeId::of::<G>(),
            name: base.rsplit("::").next().unwrap_or(base),
        }
    }

    /// Short type name, used in failure messages and group selection
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type StaticFn = Box<dyn Fn(&mut TestContext<'_>) -> BodyResult>;
type Factory = Box<dyn Fn() -> Box<dyn Any>>;
type MethodFn = Box<dyn Fn(&mut (dyn Any + 'static), &mut TestContext<'_>) -> BodyResult>;

/// Invocable body of a unit
pub enum TestBody {
    /// Runs without a group instance
    Static(StaticFn),
    /// Runs against a fresh instance built by `factory` on every invocation
    Instance { factory: Factory, method: MethodFn },
}

impl TestBody {
    pub fn from_fn<F>(body: F) -> Self
    where
        F: Fn(&mut TestContext<'_>) -> BodyResult + 'static,
    {
        TestBody::Static(Box::new(body))
    }

    pub fn from_method<G, F>(factory: fn() -> G, method: F) -> Self
    where
        G: 'static,
        F: Fn(&mut G, &mut TestContext<'_>) -> BodyResult + 'static,
    {
        let method = move |instance: &mut (dyn Any + 'static), t: &mut TestContext<'_>| {
            match instance.downcast_mut::<G>() {
                Some(instance) => method(instance, t),
                None => Err(Raised::msg(format!(
                    "Test group instance is not a {}",
                    any::type_name::<G>()
                ))),
            }
        };

        TestBody::Instance {
            factory: Box::new(move || -> Box<dyn Any> { Box::new(factory()) }),
            method: Box::new(method),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, TestBody::Static(_))
    }
}

/// One discoverable test
pub struct TestUnit {
    group: GroupId,
    name: String,
    body: TestBody,
}

impl TestUnit {
    pub fn new(group: GroupId, name: impl Into<String>, body: TestBody) -> Self {
        Self {
            group,
            name: name.into(),
            body,
        }
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &TestBody {
        &self.body
    }
}

impl fmt::Debug for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestUnit")
            .field("group", &self.group.name())
            .field("name", &self.name)
            .field("static", &self.body.is_static())
            .finish()
    }
}
