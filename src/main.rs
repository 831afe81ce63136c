//! unitrun - Minimal test discovery and execution harness
//!
//! Runs the bundled test groups and reports each unit and the overall
//! outcome. Exits non-zero when any unit fails.
//!
//! ## Usage
//!
//! ```bash
//! # Run every registered unit
//! unitrun run
//!
//! # Run a single group
//! unitrun run --group ExampleTests
//!
//! # Machine-readable report
//! unitrun run --format json-pretty
//!
//! # List groups and units
//! unitrun list --detailed
//! ```

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;

use cli::Args;
use unitrun::catalog::{CatalogProvider, Registry};
use unitrun::config::{print_env_help, EnvConfig, HarnessConfig, CONFIG_LOCATIONS};
use unitrun::executor::TestSession;
use unitrun::output::{ConsoleReporter, NullReporter, OutputFormat, Reporter, ResultFormatter};
use unitrun::utils::{init_logger, LogLevel};
use unitrun::{suites, HarnessError};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let env = EnvConfig::load();
    let config_path = args.config.clone().or_else(|| env.config_file.clone());
    let mut config = match &config_path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::load_default()?,
    };
    config.apply_env(&env);

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    };
    init_logger(level);
    debug!("Effective configuration: {:?}", config);

    match args.command {
        cli::Command::Run(run_args) => run_tests(run_args, config),
        cli::Command::List(list_args) => {
            list_tests(&suites::catalog(), list_args);
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, &config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_tests(args: cli::RunArgs, mut config: HarnessConfig) -> Result<ExitCode> {
    if let Some(format) = &args.format {
        config.format = OutputFormat::from_str(format)
            .ok_or_else(|| anyhow!("Unknown output format: {format}"))?;
    }
    if args.no_color {
        config.color = false;
    }
    if args.timing {
        config.timing = true;
    }

    let catalog = suites::catalog();
    let session = TestSession::new();

    let mut reporter: Box<dyn Reporter> = if config.format.is_streaming() {
        let console = ConsoleReporter::stdout().with_timing(config.timing);
        if config.color {
            Box::new(console)
        } else {
            Box::new(console.no_color())
        }
    } else {
        Box::new(NullReporter)
    };

    let summary = match &args.group {
        Some(name) => {
            let group = catalog
                .find_group(name)
                .ok_or_else(|| HarnessError::UnknownGroup(name.clone()))?;
            info!("Running group {}", group);
            session.run_group(&catalog, &group, reporter.as_mut())?
        }
        None => session.run_all(&catalog, reporter.as_mut())?,
    };

    let formatter = if config.color {
        ResultFormatter::new(config.format)
    } else {
        ResultFormatter::new(config.format).no_color()
    };
    let output = formatter.format_summary(&summary);
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(if summary.is_all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn list_tests(catalog: &Registry, args: cli::ListArgs) {
    println!("\nRegistered test units ({} total)", catalog.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for group in catalog.groups() {
        match catalog.title(group) {
            Some(title) => println!("\n{group} - {title}"),
            None => println!("\n{group}"),
        }
        println!("──────────────────────────────────────────────────────────────────────");

        for unit in catalog.units_in(group) {
            if args.detailed {
                let kind = if unit.body().is_static() {
                    "static"
                } else {
                    "instance"
                };
                println!("  {:32} [{}]", unit.name(), kind);
            } else {
                println!("  {}", unit.name());
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

fn manage_config(args: cli::ConfigArgs, config: &HarnessConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show { env, format } => {
            if env {
                let env = EnvConfig::load();
                if env.has_any() {
                    env.print_summary();
                } else {
                    println!("No UNITRUN_* variables set.");
                }
                println!();
                print_env_help();

                println!();
                println!("Configuration file locations (first existing one is used):");
                for location in CONFIG_LOCATIONS {
                    println!("  {location}");
                }
                match HarnessConfig::find() {
                    Some(path) => println!("  in use: {}", path.display()),
                    None => println!("  in use: none, defaults apply"),
                }
            } else {
                let output = if format == "json" {
                    serde_json::to_string_pretty(config)?
                } else {
                    serde_yaml::to_string(config)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            HarnessConfig::default().save(path)?;
            println!("✓ Configuration file created: {output}");
        }
    }

    Ok(())
}
