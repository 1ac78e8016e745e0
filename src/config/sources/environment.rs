//! Environment variable source: APP_<SECTION>_<KEY...>

use crate::config::ConfigStore;

pub const ENV_PREFIX: &str = "APP_";

/// Snapshot the process environment. Variables that are not valid UTF-8 are skipped.
pub fn process_snapshot() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Map a variable name to `(section, option)`.
///
/// The name is split on `_` at most twice, so `APP_DATABASE_MAX_POOL` yields
/// `("database", "max_pool")`. Names with fewer than three parts are ignored; empty
/// parts are kept, so `APP__HOST` maps to `("", "host")`.
pub fn parse_var_name(name: &str) -> Option<(String, String)> {
    if !name.starts_with(ENV_PREFIX) {
        return None;
    }
    let mut parts = name.splitn(3, '_');
    let _prefix = parts.next()?;
    let section = parts.next()?;
    let option = parts.next()?;
    Some((section.to_lowercase(), option.to_lowercase()))
}

/// Build a layer from an environment snapshot. Values are kept as-is.
pub fn collect_layer<I, K, V>(vars: I) -> ConfigStore
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut layer = ConfigStore::default();
    for (name, value) in vars {
        if let Some((section, option)) = parse_var_name(name.as_ref()) {
            layer.set_option(&section, &option, value.into());
        }
    }
    layer
}
