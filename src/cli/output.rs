//! CLI output: text rendering and error mapping for the CLI surface.

use crate::config::{ConfigStore, Section};
use crate::error::AppError;

/// Map errors to a string for CLI output.
pub fn map_error(e: &AppError) -> String {
    e.to_string()
}

/// `option = value` lines.
pub fn format_section_text(section: &Section) -> String {
    section
        .iter()
        .map(|(option, value)| format!("{} = {}", option, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// INI-style rendering of the whole store, sections separated by a blank line.
pub fn format_store_text(store: &ConfigStore) -> String {
    store
        .iter()
        .map(|(name, section)| {
            if section.is_empty() {
                format!("[{}]", name)
            } else {
                format!("[{}]\n{}", name, format_section_text(&section))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
