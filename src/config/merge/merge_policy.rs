//! Merge rules: stage order, override order, conflict handling.

use crate::config::ConfigStore;
use std::fmt;

/// One step of store construction. Later stages override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MergeStage {
    BaseFile,
    EnvironmentFile,
    SecretFile,
    EnvironmentVariables,
    Overrides,
}

impl MergeStage {
    /// All stages, lowest priority first.
    pub const ORDER: [MergeStage; 5] = [
        MergeStage::BaseFile,
        MergeStage::EnvironmentFile,
        MergeStage::SecretFile,
        MergeStage::EnvironmentVariables,
        MergeStage::Overrides,
    ];

    pub fn is_file(self) -> bool {
        matches!(
            self,
            MergeStage::BaseFile | MergeStage::EnvironmentFile | MergeStage::SecretFile
        )
    }
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStage::BaseFile => "base-file",
            MergeStage::EnvironmentFile => "environment-file",
            MergeStage::SecretFile => "secret-file",
            MergeStage::EnvironmentVariables => "environment-variables",
            MergeStage::Overrides => "overrides",
        };
        f.write_str(name)
    }
}

/// Merge `layer` into `target` one option at a time.
///
/// Sections new to `target` are appended (even when empty); options the layer
/// does not define keep their current value. Defaults merge the same way.
pub fn apply(target: &mut ConfigStore, layer: ConfigStore) {
    let defaults = target.defaults_mut();
    for (option, value) in layer.defaults().iter() {
        defaults.set(option, value);
    }
    for (name, section) in layer.own_sections() {
        let existing = target.ensure_section(name);
        for (option, value) in section.iter() {
            existing.set(option, value);
        }
    }
}
