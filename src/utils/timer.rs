//! Timing helpers

use std::time::{Duration, Instant};

/// Measures how long a unit body ran
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timer and return elapsed milliseconds
    pub fn stop_ms(self) -> u64 {
        let elapsed = self.elapsed();
        tracing::debug!("{}: {}ms", self.label, elapsed.as_millis());
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
