//! Appcfg CLI Binary
//!
//! Entry point of the application skeleton: load configuration, set up logging, run.

use anyhow::Context;
use appcfg::cli::{Cli, RunContext};
use appcfg::config::ConfigStore;
use appcfg::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Configuration comes first: logging is configured from it
    let context = match RunContext::new(cli.env.clone(), cli.root.clone(), cli.overrides()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", appcfg::cli::map_error(&e));
            process::exit(1);
        }
    };

    if let Err(e) = setup_logging(&cli, context.store()) {
        eprintln!("Failed to initialize logging: {:#}", e);
        process::exit(1);
    }

    info!(env = %context.env(), "Configuration loaded");

    match context.execute(cli.command.as_ref()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", appcfg::cli::map_error(&e));
            process::exit(1);
        }
    }
}

fn setup_logging(cli: &Cli, store: &ConfigStore) -> anyhow::Result<()> {
    let config = build_logging_config(cli, store).context("reading [logging] section")?;
    init_logging(&config).context("installing subscriber")?;
    Ok(())
}

/// Build logging configuration from the store and CLI flags.
/// Precedence: CLI flags override the merged configuration, which overrides defaults.
fn build_logging_config(cli: &Cli, store: &ConfigStore) -> anyhow::Result<LoggingConfig> {
    let mut config = LoggingConfig::from_store(store)?;
    if cli.verbose {
        config.level = "debug".to_string();
    }
    Ok(config)
}
