//! Explicit override source (command line `--config KEY VALUE` pairs)

use crate::config::{split_key, ConfigStore};

/// Build a layer from ordered `(section.option, value)` pairs.
///
/// Pairs whose key has no dot are skipped. Later pairs win over earlier ones.
pub fn collect_layer<I, K, V>(pairs: I) -> ConfigStore
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut layer = ConfigStore::default();
    for (key, value) in pairs {
        if let Some((section, option)) = split_key(key.as_ref()) {
            layer.set_option(section, option, value.into());
        }
    }
    layer
}
