//! CLI parse: clap types for appcfg. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Application skeleton with layered configuration
#[derive(Parser, Debug)]
#[command(name = "appcfg")]
#[command(version, about = "Application skeleton with layered configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Environment to use (dev, prod, etc.)
    #[arg(long, default_value = "dev")]
    pub env: String,

    /// Override config values (can be used multiple times)
    #[arg(long = "config", num_args = 2, value_names = ["KEY", "VALUE"], action = clap::ArgAction::Append)]
    pub config: Vec<String>,

    /// Directory containing config.ini, config.<env>.ini and secret.ini
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose logging (forces the debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// `--config KEY VALUE` occurrences as ordered pairs.
    pub fn overrides(&self) -> Vec<(String, String)> {
        self.config
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print a value (section.option), a section, or the whole merged configuration
    Show {
        /// Key to print; omit for everything
        key: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List section names in discovery order
    Sections,
}
