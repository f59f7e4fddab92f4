// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates deployctl.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ResourceName;

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, namespace: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(ns) = namespace {
        config.namespace =
            ResourceName::new(ns).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"namespace: {}
# State file holding deployment configs and deployments (relative to the project directory)
state: {}
# Output mode: normal, quiet, or json
# output: normal
"#,
        config.namespace,
        config.state.display()
    )
}
