//! Appcfg: application skeleton with layered configuration
//!
//! Loads `section.option` settings from `config.ini`, `config.<env>.ini`, `secret.ini`,
//! `APP_` environment variables and explicit overrides, in increasing priority.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
