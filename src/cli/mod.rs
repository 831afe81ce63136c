//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Minimal test discovery and execution harness
#[derive(Parser, Debug)]
#[command(name = "unitrun")]
#[command(version)]
#[command(about = "Discover, run and report registered test units")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run registered test units
    Run(RunArgs),

    /// List registered groups and units
    List(ListArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Run only the units of this group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Output format (text, table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show per-unit durations
    #[arg(short, long)]
    pub timing: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show body kind for each unit
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for config management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show {
        /// Show environment variables instead
        #[arg(long)]
        env: bool,

        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Write a configuration file with default settings
    Init {
        /// Output file path
        #[arg(short, long, default_value = "./unitrun.yaml")]
        output: String,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_group() {
        let args = Args::parse_from(["unitrun", "run", "--group", "ExampleTests", "--no-color"]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.group.as_deref(), Some("ExampleTests"));
                assert!(run.no_color);
                assert!(run.format.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let args = Args::parse_from(["unitrun", "list", "--config", "ci.yaml", "-d"]);
        assert_eq!(args.config.as_deref(), Some("ci.yaml"));
        assert!(matches!(args.command, Command::List(ListArgs { detailed: true })));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
