//! CLI route: run context and the single route table.

use crate::cli::output::{format_section_text, format_store_text};
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, ConfigStore, ConfigValue};
use crate::error::AppError;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: environment name and the merged store.
pub struct RunContext {
    env: String,
    store: ConfigStore,
}

impl RunContext {
    /// Load the store for `env` from `root` and the process environment.
    pub fn new(
        env: String,
        root: PathBuf,
        overrides: Vec<(String, String)>,
    ) -> Result<Self, AppError> {
        let store = ConfigLoader::from_process(env.clone())
            .root(root)
            .overrides(overrides)
            .load()?;
        Ok(Self { env, store })
    }

    pub fn from_store(env: String, store: ConfigStore) -> Self {
        Self { env, store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&self, command: Option<&Commands>) -> Result<String, AppError> {
        match command {
            None => self.handle_run(),
            Some(Commands::Show { key, format }) => self.handle_show(key.as_deref(), format),
            Some(Commands::Sections) => Ok(self.store.sections().join("\n")),
        }
    }

    fn handle_run(&self) -> Result<String, AppError> {
        info!(env = %self.env, "Starting application in {} environment", self.env);
        info!("Application finished");
        Ok(String::new())
    }

    fn handle_show(&self, key: Option<&str>, format: &str) -> Result<String, AppError> {
        let json = match format {
            "text" => false,
            "json" => true,
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "output format '{}' (expected text or json)",
                    other
                )))
            }
        };

        let Some(key) = key else {
            return if json {
                to_json(&self.store)
            } else {
                Ok(format_store_text(&self.store))
            };
        };

        match self.store.get_config(key) {
            Some(ConfigValue::Value(value)) if json => to_json(&value),
            Some(ConfigValue::Value(value)) => Ok(value),
            Some(ConfigValue::Section(section)) if json => to_json(&section),
            Some(ConfigValue::Section(section)) => Ok(format_section_text(&section)),
            None => Err(AppError::NotFound(format!("config key '{}'", key))),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}
