//! INI file source: config.ini, config.{env}.ini and secret.ini
//!
//! Line rules:
//! - `[name]` opens a section; `[DEFAULT]` holds options every section inherits.
//! - `option = value` or `option: value`, split on the first separator.
//! - Lines starting with `#` or `;` are comments.
//! - A line indented deeper than the option it follows continues that option's value.
//! - Values are kept as written apart from surrounding whitespace; quotes are not stripped.
//! - A section or option repeated within one file is an error.

use crate::config::{ConfigStore, Section};
use crate::error::ConfigStoreError;
use std::fmt::Display;
use std::path::Path;
use tracing::trace;

pub const BASE_FILE: &str = "config.ini";
pub const SECRET_FILE: &str = "secret.ini";

/// Header whose options are inherited instead of forming a section. Matched case-sensitively.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// File name of the environment-specific layer, e.g. `config.dev.ini`.
pub fn env_file_name(env: &str) -> String {
    format!("config.{}.ini", env)
}

/// Read and parse `path` if it exists. A missing file is not an error.
pub fn read_layer(path: &Path) -> Result<Option<ConfigStore>, ConfigStoreError> {
    if !path.exists() {
        trace!(config_path = %path.display(), "Config file not present, skipping");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layer = parse_layer(path, &content)?;
    trace!(config_path = %path.display(), sections = layer.len(), "Parsed config file");
    Ok(Some(layer))
}

/// Parse sectioned INI text into a layer. `origin` is only used in error messages.
pub fn parse_layer(origin: &Path, content: &str) -> Result<ConfigStore, ConfigStoreError> {
    let mut parser = LayerParser::new(origin);
    for (line_num, line) in content.lines().enumerate() {
        parser.feed(line_num + 1, line)?;
    }
    Ok(parser.finish())
}

enum Target {
    Defaults,
    Named(String),
}

/// Option whose value may still grow through continuation lines.
struct OpenValue {
    option: String,
    indent: usize,
    lines: Vec<String>,
}

struct LayerParser<'a> {
    origin: &'a Path,
    layer: ConfigStore,
    target: Option<Target>,
    open: Option<OpenValue>,
}

impl<'a> LayerParser<'a> {
    fn new(origin: &'a Path) -> Self {
        Self {
            origin,
            layer: ConfigStore::default(),
            target: None,
            open: None,
        }
    }

    fn feed(&mut self, line_num: usize, line: &str) -> Result<(), ConfigStoreError> {
        let text = line.trim();
        if text.starts_with('#') || text.starts_with(';') {
            return Ok(());
        }
        if text.is_empty() {
            // kept only if a continuation line follows; trailing blanks are trimmed on close
            if let Some(open) = self.open.as_mut() {
                open.lines.push(String::new());
            }
            return Ok(());
        }

        let indent = line.len() - line.trim_start().len();
        if let Some(open) = self.open.as_mut() {
            if indent > open.indent {
                open.lines.push(text.to_string());
                return Ok(());
            }
        }

        self.close_value();
        if text.starts_with('[') {
            self.header(line_num, text)
        } else {
            self.option(line_num, text, indent)
        }
    }

    fn header(&mut self, line_num: usize, text: &str) -> Result<(), ConfigStoreError> {
        let Some(close) = text.rfind(']') else {
            return Err(self.error(line_num, format!("unterminated section header '{}'", text)));
        };
        let name = text[1..close].trim();
        if name.is_empty() {
            return Err(self.error(line_num, "empty section name"));
        }

        if name == DEFAULT_SECTION {
            self.target = Some(Target::Defaults);
            return Ok(());
        }
        let name = name.to_lowercase();
        if self.layer.own_sections().any(|(existing, _)| existing == name) {
            return Err(self.error(line_num, format!("section '{}' already exists", name)));
        }
        self.layer.ensure_section(&name);
        self.target = Some(Target::Named(name));
        Ok(())
    }

    fn option(&mut self, line_num: usize, text: &str, indent: usize) -> Result<(), ConfigStoreError> {
        let split = text.split_once(|c: char| c == '=' || c == ':');
        let Some(target) = self.target.as_ref() else {
            let key = split.map(|(key, _)| key.trim()).unwrap_or(text);
            return Err(ConfigStoreError::MissingSectionHeader {
                path: self.origin.to_path_buf(),
                key: key.to_string(),
            });
        };
        let Some((option, value)) = split else {
            return Err(self.error(line_num, format!("expected 'option = value', found '{}'", text)));
        };
        let option = option.trim().to_lowercase();
        if option.is_empty() {
            return Err(self.error(line_num, "empty option name"));
        }

        let section = section_mut(&mut self.layer, target);
        if section.contains(&option) {
            let owner = match target {
                Target::Defaults => DEFAULT_SECTION.to_string(),
                Target::Named(name) => name.clone(),
            };
            return Err(self.error(
                line_num,
                format!("option '{}' in section '{}' already exists", option, owner),
            ));
        }
        let value = value.trim();
        section.set(&option, value);
        self.open = Some(OpenValue {
            option,
            indent,
            lines: vec![value.to_string()],
        });
        Ok(())
    }

    fn close_value(&mut self) {
        let (Some(open), Some(target)) = (self.open.take(), self.target.as_ref()) else {
            return;
        };
        if open.lines.len() > 1 {
            let value = open.lines.join("\n");
            section_mut(&mut self.layer, target).set(&open.option, value.trim_end());
        }
    }

    fn finish(mut self) -> ConfigStore {
        self.close_value();
        self.layer
    }

    fn error(&self, line_num: usize, message: impl Display) -> ConfigStoreError {
        ConfigStoreError::Parse {
            path: self.origin.to_path_buf(),
            message: format!("line {}: {}", line_num, message),
        }
    }
}

fn section_mut<'s>(layer: &'s mut ConfigStore, target: &Target) -> &'s mut Section {
    match target {
        Target::Defaults => layer.defaults_mut(),
        Target::Named(name) => layer.ensure_section(name),
    }
}
