// ABOUTME: Configuration types and parsing for deployctl.yml.
// ABOUTME: Handles YAML parsing, file discovery, and command-line overrides.

mod init;

pub use init::init_config;

use crate::error::{Error, Result};
use crate::output::OutputMode;
use crate::types::ResourceName;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "deployctl.yml";
pub const CONFIG_FILENAME_ALT: &str = "deployctl.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".deployctl/config.yml";

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_STATE_PATH: &str = ".deployctl/state.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Namespace deployment configs are resolved in.
    #[serde(default = "default_namespace")]
    pub namespace: ResourceName,

    /// Path of the state file, relative to the project directory.
    #[serde(default = "default_state_path")]
    pub state: PathBuf,

    #[serde(default)]
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: default_namespace(),
            state: default_state_path(),
            output: OutputMode::default(),
        }
    }
}

fn default_namespace() -> ResourceName {
    ResourceName::new(DEFAULT_NAMESPACE).expect("default namespace is a valid name")
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_PATH)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find the config file in `dir`, if any.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load the config file in `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => Err(Error::ConfigNotFound(dir.to_path_buf())),
        }
    }

    /// Load the config file in `dir`, or fall back to defaults when none exists.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        namespace: Option<&str>,
        state: Option<&Path>,
    ) -> Result<Self> {
        if let Some(ns) = namespace {
            self.namespace =
                ResourceName::new(ns).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        }
        if let Some(path) = state {
            self.state = path.to_path_buf();
        }
        Ok(self)
    }

    /// State file location resolved against the project directory `dir` when relative,
    /// wherever the config file itself was found.
    pub fn state_path(&self, dir: &Path) -> PathBuf {
        if self.state.is_absolute() {
            self.state.clone()
        } else {
            dir.join(&self.state)
        }
    }

    pub fn template() -> Self {
        Self::default()
    }
}
