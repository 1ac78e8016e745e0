//! CLI domain: parse, route and output only.

mod output;
mod parse;
mod route;

pub use output::{format_section_text, format_store_text, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
