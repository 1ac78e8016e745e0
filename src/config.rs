//! Configuration System
//!
//! Layered `section.option` configuration store. Values are merged from INI files,
//! `APP_` environment variables and explicit overrides, in that order of increasing
//! priority. Every stage merges at option granularity, so a later stage never clears
//! options it does not mention.

use crate::error::ConfigStoreError;
use serde::ser::{Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

pub use config::Map;

mod facade;
mod merge;
mod sources;

pub use facade::{ConfigLoader, DEFAULT_ENV};
pub use merge::MergeStage;
pub use sources::environment::ENV_PREFIX;

/// Split `section.option` on the first dot.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('.')
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// A named group of options. Option names are stored lowercased, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    options: Map<String, String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(&normalize(option)).map(String::as_str)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(&normalize(option))
    }

    /// Insert or overwrite a single option.
    pub fn set(&mut self, option: &str, value: impl Into<String>) {
        self.options.insert(normalize(option), value.into());
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Section
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (option, value) in iter {
            section.set(option.as_ref(), value);
        }
        section
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Result of a lookup: a single option value or a snapshot of a whole section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Value(String),
    Section(Section),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Value(value) => Some(value),
            ConfigValue::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ConfigValue::Value(_) => None,
            ConfigValue::Section(section) => Some(section),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Value(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Value(value)
    }
}

impl From<Section> for ConfigValue {
    fn from(section: Section) -> Self {
        ConfigValue::Section(section)
    }
}

/// Merged configuration: `section -> option -> value`, sections in discovery order.
///
/// Options read from an INI `[DEFAULT]` section live apart from the named sections.
/// Every section inherits them unless it defines the option itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    defaults: Section,
    sections: Map<String, Section>,
}

impl ConfigStore {
    /// Load from the working directory and the process environment.
    ///
    /// Equivalent to `ConfigLoader::from_process(env).overrides(..).load()`.
    pub fn new(env: &str, overrides: &[(String, String)]) -> Result<Self, ConfigStoreError> {
        ConfigLoader::from_process(env)
            .overrides(overrides.iter().cloned())
            .load()
    }

    /// Look up `section.option` (string value) or a bare section name (snapshot).
    pub fn get_config(&self, key: &str) -> Option<ConfigValue> {
        match split_key(key) {
            Some(_) => self.get_str(key).map(ConfigValue::from),
            None => self.section(key).map(ConfigValue::Section),
        }
    }

    /// Like [`get_config`](Self::get_config), returning `default` unchanged on a miss.
    pub fn get_config_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get_config(key).unwrap_or_else(|| default.into())
    }

    /// Borrowed lookup of a dotted key. Bare section names yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let (section, option) = split_key(key)?;
        let own = self.sections.get(&normalize(section))?;
        own.get(option).or_else(|| self.defaults.get(option))
    }

    /// Parse a dotted key's value into `T`. A missing key is `Ok(None)`.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigStoreError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(raw) = self.get_str(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigStoreError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            })
    }

    /// Store `value`'s string form under `section.option`, creating the section if needed.
    ///
    /// Keys without a dot are rejected and leave the store untouched.
    pub fn set_config(&mut self, key: &str, value: impl Display) -> Result<(), ConfigStoreError> {
        let (section, option) =
            split_key(key).ok_or_else(|| ConfigStoreError::InvalidKey(key.to_string()))?;
        self.set_option(section, option, value.to_string());
        Ok(())
    }

    /// Section names in discovery order. The defaults are not a section.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Snapshot of a section with inherited defaults filled in.
    pub fn section(&self, name: &str) -> Option<Section> {
        self.sections
            .get(&normalize(name))
            .map(|own| self.with_defaults(own))
    }

    /// Options every section inherits.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Sections in discovery order, each with inherited defaults filled in.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Section)> + '_ {
        self.sections
            .iter()
            .map(move |(name, own)| (name.as_str(), self.with_defaults(own)))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.is_empty()
    }

    fn with_defaults(&self, own: &Section) -> Section {
        let mut merged = own.clone();
        for (option, value) in self.defaults.iter() {
            if !merged.contains(option) {
                merged.set(option, value);
            }
        }
        merged
    }

    /// Sections as stored, without inherited defaults.
    pub(crate) fn own_sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    pub(crate) fn ensure_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(normalize(name)).or_default()
    }

    pub(crate) fn set_option(&mut self, section: &str, option: &str, value: String) {
        self.ensure_section(section).set(option, value);
    }
}

impl Serialize for ConfigStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
