//! Config loader: resolves the stage inputs and runs the merge in order.

use crate::config::merge::{apply, MergeStage};
use crate::config::sources::{environment, ini_file, overrides};
use crate::config::ConfigStore;
use crate::error::ConfigStoreError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment name used when none is given.
pub const DEFAULT_ENV: &str = "dev";

/// Builder for a [`ConfigStore`].
///
/// The environment variable stage reads the snapshot given to
/// [`environment`](Self::environment), never the live process environment, unless the
/// loader was created with [`from_process`](Self::from_process).
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env: String,
    root: PathBuf,
    environment: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV)
    }
}

impl ConfigLoader {
    /// Loader for `env` reading files from the working directory, with an empty
    /// environment snapshot and no overrides.
    pub fn new(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            root: PathBuf::from("."),
            environment: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Loader whose environment snapshot is taken from the current process.
    pub fn from_process(env: impl Into<String>) -> Self {
        Self::new(env).environment(environment::process_snapshot())
    }

    /// Directory containing `config.ini`, `config.<env>.ini` and `secret.ini`.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Replace the environment snapshot.
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Replace the ordered override pairs.
    pub fn overrides<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// Path read by a file stage; `None` for the non-file stages.
    pub fn file_path(&self, stage: MergeStage) -> Option<PathBuf> {
        let name = match stage {
            MergeStage::BaseFile => ini_file::BASE_FILE.to_string(),
            MergeStage::EnvironmentFile => ini_file::env_file_name(&self.env),
            MergeStage::SecretFile => ini_file::SECRET_FILE.to_string(),
            MergeStage::EnvironmentVariables | MergeStage::Overrides => return None,
        };
        Some(self.root.join(name))
    }

    /// Run every stage in priority order and return the merged store.
    pub fn load(&self) -> Result<ConfigStore, ConfigStoreError> {
        let mut store = ConfigStore::default();
        for stage in MergeStage::ORDER {
            let Some(layer) = self.layer(stage)? else {
                continue;
            };
            debug!(
                stage = %stage,
                env = %self.env,
                sections = layer.len(),
                "Merging configuration layer"
            );
            apply(&mut store, layer);
        }
        Ok(store)
    }

    fn layer(&self, stage: MergeStage) -> Result<Option<ConfigStore>, ConfigStoreError> {
        if stage.is_file() {
            return match self.file_path(stage) {
                Some(path) => ini_file::read_layer(&path),
                None => Ok(None),
            };
        }
        match stage {
            MergeStage::EnvironmentVariables => Ok(Some(environment::collect_layer(
                self.environment.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ))),
            MergeStage::Overrides => Ok(Some(overrides::collect_layer(
                self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ))),
            MergeStage::BaseFile | MergeStage::EnvironmentFile | MergeStage::SecretFile => Ok(None),
        }
    }
}
