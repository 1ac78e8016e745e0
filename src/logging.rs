//! Logging System
//!
//! Structured logging using the `tracing` crate, configured from the `[logging]`
//! section of the merged configuration store.

use crate::config::ConfigStore;
use crate::error::AppError;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full filter directive; wins over `logging.level`.
pub const LOG_FILTER_ENV: &str = "APP_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: json, text (default: text). Anything else falls back to text.
    pub format: String,

    /// Output destination: stdout, stderr (default: stderr)
    pub output: String,

    /// Enable colored output (text format only)
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            color: default_true(),
        }
    }
}

impl LoggingConfig {
    /// Read `logging.level`, `logging.format`, `logging.output` and `logging.color`.
    pub fn from_store(store: &ConfigStore) -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            level: store
                .get_str("logging.level")
                .map(str::to_string)
                .unwrap_or(defaults.level),
            format: store
                .get_str("logging.format")
                .map(str::to_lowercase)
                .unwrap_or(defaults.format),
            output: store
                .get_str("logging.output")
                .map(str::to_lowercase)
                .unwrap_or(defaults.output),
            color: store
                .get_parsed::<bool>("logging.color")?
                .unwrap_or(defaults.color),
        })
    }
}

/// Level the subscriber runs at, and whether the configured value had to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLevel {
    Level(Level),
    Off,
    Fallback(Level),
}

/// Resolve a configured level name case-insensitively. Unknown names fall back to INFO.
///
/// `warning` and `critical` are accepted as aliases of `warn` and `error`.
pub fn resolve_level(level: &str) -> ResolvedLevel {
    let level = level.trim();
    if level.eq_ignore_ascii_case("off") {
        return ResolvedLevel::Off;
    }
    if level.eq_ignore_ascii_case("warning") {
        return ResolvedLevel::Level(Level::WARN);
    }
    if level.eq_ignore_ascii_case("critical") {
        return ResolvedLevel::Level(Level::ERROR);
    }
    match Level::from_str(level) {
        Ok(parsed) => ResolvedLevel::Level(parsed),
        Err(_) => ResolvedLevel::Fallback(Level::INFO),
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. `APP_LOG` filter directive
/// 2. `logging.level` from the configuration store
/// 3. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let resolved = resolve_level(&config.level);
    let filter = build_env_filter(resolved)?;
    let format = determine_format(config);
    let output = determine_output(config)?;

    let base_subscriber = Registry::default().with(filter);

    let installed = match (format.unwrap_or(LogFormat::Text), output) {
        (LogFormat::Json, Output::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Json, Output::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (LogFormat::Text, Output::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Text, Output::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.map_err(|e| AppError::Logging(format!("Failed to install subscriber: {}", e)))?;

    if let ResolvedLevel::Fallback(level) = resolved {
        tracing::warn!("Invalid log level: {}, defaulting to {}", config.level, level);
    }
    if format.is_none() {
        tracing::warn!("Invalid log format: {}, defaulting to text", config.format);
    }

    Ok(())
}

fn build_env_filter(resolved: ResolvedLevel) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return Ok(filter);
    }

    let directive = match resolved {
        ResolvedLevel::Off => "off".to_string(),
        ResolvedLevel::Level(level) | ResolvedLevel::Fallback(level) => {
            level.to_string().to_lowercase()
        }
    };
    EnvFilter::try_new(&directive)
        .map_err(|e| AppError::Logging(format!("Invalid log directive '{}': {}", directive, e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
}

/// `None` for an unrecognized format; the caller falls back to text.
fn determine_format(config: &LoggingConfig) -> Option<LogFormat> {
    match config.format.as_str() {
        "text" => Some(LogFormat::Text),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn determine_output(config: &LoggingConfig) -> Result<Output, AppError> {
    match config.output.as_str() {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        other => Err(AppError::Logging(format!(
            "Invalid log output: {} (must be 'stdout' or 'stderr')",
            other
        ))),
    }
}
