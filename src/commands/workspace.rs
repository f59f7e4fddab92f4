// ABOUTME: Loads the config file and state file for a command.
// ABOUTME: Resolves deployment configs and writes the store back after mutations.

use std::path::Path;

use deployctl::config::Config;
use deployctl::deploy::DeploymentConfig;
use deployctl::error::{Error, Result};
use deployctl::store::{MemoryStore, StateFile};
use deployctl::types::ResourceName;

/// Config, state file, and the store loaded from it.
pub struct Workspace {
    config: Config,
    state: StateFile,
    store: MemoryStore,
}

impl Workspace {
    /// Open the workspace rooted at `dir`, applying command-line overrides.
    pub fn open(dir: &Path, namespace: Option<&str>, state: Option<&Path>) -> Result<Self> {
        let config = Config::discover_or_default(dir)?.with_overrides(namespace, state)?;
        let (state, store) = StateFile::load(&config.state_path(dir))?;
        Ok(Self {
            config,
            state,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Look up a deployment config by name in the configured namespace.
    pub fn resolve(&self, name: &str) -> Result<DeploymentConfig> {
        let name = ResourceName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let config = self
            .store
            .get_config(self.config.namespace.as_str(), name.as_str())?;
        Ok(config)
    }

    /// Persist the store back to the state file.
    pub fn commit(mut self) -> Result<()> {
        self.state.save(&self.store)?;
        tracing::debug!("Committed {}", self.state.path().display());
        Ok(())
    }
}
