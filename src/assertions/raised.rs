//! Errors raised out of test bodies and checked callables

use std::any::{self, Any};
use std::error::Error;
use std::fmt;

/// Kind reported for a caught panic
pub const PANIC_KIND: &str = "panic";

/// Kind reported for errors built from a plain message
pub const MESSAGE_KIND: &str = "message";

/// An error raised by a test body or by a callable under check
///
/// Any `std::error::Error + Send + Sync + 'static` converts into `Raised`
/// with `?`, which records the concrete type so kind checks can match it.
/// Panics are captured as kind [`PANIC_KIND`].
pub struct Raised {
    kind: &'static str,
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl Raised {
    /// Raise an ad-hoc error carrying only a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: MESSAGE_KIND,
            message: message.into(),
            source: None,
        }
    }

    /// Build from a panic payload returned by `catch_unwind`
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };

        Self {
            kind: PANIC_KIND,
            message,
            source: None,
        }
    }

    /// Type path of the raised error, `panic`, or `message`
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the raised error is of type `K`
    pub fn is<K: Error + 'static>(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|source| source.downcast_ref::<K>().is_some())
    }

    pub fn downcast_ref<K: Error + 'static>(&self) -> Option<&K> {
        self.source.as_deref().and_then(|source| source.downcast_ref::<K>())
    }
}

impl<E> From<E> for Raised
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self {
            kind: any::type_name::<E>(),
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raised")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}
