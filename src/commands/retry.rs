// ABOUTME: Retry command implementation.
// ABOUTME: Resets the latest failed deployment so the controller runs it again.

use super::workspace::Workspace;
use deployctl::deploy::retry as retry_deployment;
use deployctl::error::Result;
use deployctl::output::Output;

/// Retry the latest deployment of the named config.
pub async fn retry(workspace: Workspace, name: &str, output: &Output) -> Result<()> {
    let config = workspace.resolve(name)?;

    output.progress(&format!(
        "Retrying deployment #{} of {}/{}",
        config.latest_version, config.namespace, config.name
    ));

    let deployment = retry_deployment(workspace.store(), &config).await?;
    workspace.commit()?;

    output.success(&format!(
        "Retried deployment {} (#{})",
        deployment.name, config.latest_version
    ));
    Ok(())
}
