// ABOUTME: Latest command implementation.
// ABOUTME: Starts a new deployment by advancing the config's version.

use super::workspace::Workspace;
use deployctl::deploy::start_latest;
use deployctl::error::Result;
use deployctl::output::Output;

/// Start a new deployment of the named config.
pub async fn latest(workspace: Workspace, name: &str, output: &Output) -> Result<()> {
    let config = workspace.resolve(name)?;

    output.progress(&format!(
        "Starting deployment of {}/{} (current version {})",
        config.namespace, config.name, config.latest_version
    ));

    let updated = start_latest(workspace.store(), &config).await?;
    workspace.commit()?;

    output.success(&format!(
        "Started deployment #{} of {}",
        updated.latest_version, updated.name
    ));
    Ok(())
}
