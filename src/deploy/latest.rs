// ABOUTME: Start-latest operation: advances a config to its next version.
// ABOUTME: Refuses while the current version's deployment is still active.

use crate::store::DeploymentClient;

use super::deployment::{DeploymentConfig, status_of};
use super::error::LifecycleError;

/// Request a new deployment by bumping the config's latest version.
///
/// The current deployment must be absent or terminal. The new deployment
/// object is not created here; the controller materializes it after observing
/// the stored version change.
///
/// # Errors
///
/// - `LifecycleError::InProgress` if the current deployment is New, Pending
///   or Running. Nothing is written.
/// - `LifecycleError::Store` if the lookup or the config update fails,
///   including a write conflict from a concurrent update.
pub async fn start_latest<C: DeploymentClient + ?Sized>(
    client: &C,
    config: &DeploymentConfig,
) -> Result<DeploymentConfig, LifecycleError> {
    let namespace = config.namespace.as_str();
    let current = config.latest_deployment_name();

    match client.get_deployment(namespace, &current).await {
        Ok(deployment) => {
            let status = status_of(&deployment)?;
            if !status.is_terminal() {
                return Err(LifecycleError::InProgress {
                    deployment: current,
                    status,
                });
            }
            tracing::debug!("Deployment {}/{} is {}", namespace, current, status);
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!("No deployment {}/{} yet", namespace, current);
        }
        Err(e) => return Err(e.into()),
    }

    let next_version = config.latest_version.checked_add(1).ok_or_else(|| {
        LifecycleError::VersionOverflow {
            config: config.name.to_string(),
            version: config.latest_version,
        }
    })?;

    let mut updated = config.clone();
    updated.latest_version = next_version;
    let stored = client.update_deployment_config(&updated).await?;

    tracing::info!(
        "Advanced deployment config {}/{} to version {}",
        namespace,
        config.name,
        stored.latest_version
    );
    Ok(stored)
}
