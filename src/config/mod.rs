//! Configuration module
//!
//! Settings come from a config file, then `UNITRUN_*` environment
//! variables, then command-line flags, each layer overriding the last.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::CONFIG_LOCATIONS;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::output::OutputFormat;
use crate::utils::LogLevel;

/// Harness configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Report format
    pub format: OutputFormat,

    /// Colorize console output
    pub color: bool,

    /// Show per-unit durations
    pub timing: bool,

    /// Diagnostic log level
    pub log_level: LogLevel,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            timing: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl HarnessConfig {
    /// Override fields set in the environment; unparseable values are ignored
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(format) = &env.format {
            match OutputFormat::from_str(format) {
                Some(format) => self.format = format,
                None => warn!("Ignoring unknown output format in environment: {}", format),
            }
        }
        if let Some(level) = &env.log_level {
            match LogLevel::from_str(level) {
                Some(level) => self.log_level = level,
                None => warn!("Ignoring unknown log level in environment: {}", level),
            }
        }
        if let Some(color) = env.color {
            self.color = color;
        }
        if let Some(timing) = env.timing {
            self.timing = timing;
        }
    }
}
