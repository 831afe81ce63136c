//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "UNITRUN";

/// Configuration read from `UNITRUN_*` variables
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvConfig {
    /// Output format from UNITRUN_FORMAT
    pub format: Option<String>,
    /// Color from UNITRUN_COLOR
    pub color: Option<bool>,
    /// Timing from UNITRUN_TIMING
    pub timing: Option<bool>,
    /// Log level from UNITRUN_LOG
    pub log_level: Option<String>,
    /// Config file from UNITRUN_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            format: get("FORMAT"),
            color: get("COLOR").map(|v| parse_bool(&v)),
            timing: get("TIMING").map(|v| parse_bool(&v)),
            log_level: get("LOG"),
            config_file: get("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        *self != Self::default()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_FORMAT:  {:?}", ENV_PREFIX, self.format);
        println!("  {}_COLOR:   {:?}", ENV_PREFIX, self.color);
        println!("  {}_TIMING:  {:?}", ENV_PREFIX, self.timing);
        println!("  {}_LOG:     {:?}", ENV_PREFIX, self.log_level);
        println!("  {}_CONFIG:  {:?}", ENV_PREFIX, self.config_file);
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Print all UNITRUN environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_FORMAT   Output format (text, table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_COLOR    Colorize console output (true/false)");
    println!("  {ENV_PREFIX}_TIMING   Show per-unit durations (true/false)");
    println!("  {ENV_PREFIX}_LOG      Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_CONFIG   Path to configuration file");
}
