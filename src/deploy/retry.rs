// ABOUTME: Retry operation: resets a failed deployment back to New in place.
// ABOUTME: Reuses the existing version instead of allocating a new one.

use crate::store::DeploymentClient;

use super::deployment::{
    CANCELLED_ANNOTATION, CANCELLED_AT_ANNOTATION, CANCELLED_BY_ANNOTATION, Deployment,
    DeploymentConfig, STATUS_REASON_ANNOTATION, status_of,
};
use super::error::LifecycleError;
use super::status::DeploymentStatus;

/// Retry the config's current deployment.
///
/// Only a deployment in `Failed` can be retried. The same record is rewritten
/// to `New` and any earlier cancellation request is cleared so the controller
/// runs it again. The config's version is not touched.
///
/// # Errors
///
/// - `LifecycleError::NotRetryable` if the deployment is missing or not
///   `Failed`. Nothing is written.
/// - `LifecycleError::Store` if the lookup or the update fails.
pub async fn retry<C: DeploymentClient + ?Sized>(
    client: &C,
    config: &DeploymentConfig,
) -> Result<Deployment, LifecycleError> {
    let namespace = config.namespace.as_str();
    let current = config.latest_deployment_name();

    let mut deployment = match client.get_deployment(namespace, &current).await {
        Ok(deployment) => deployment,
        Err(e) if e.is_not_found() => {
            return Err(LifecycleError::NotRetryable {
                deployment: current,
                found: None,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let status = status_of(&deployment)?;
    if status != DeploymentStatus::Failed {
        return Err(LifecycleError::NotRetryable {
            deployment: current,
            found: Some(status),
        });
    }

    deployment.set_status(DeploymentStatus::New);
    for annotation in [
        CANCELLED_ANNOTATION,
        CANCELLED_BY_ANNOTATION,
        CANCELLED_AT_ANNOTATION,
        STATUS_REASON_ANNOTATION,
    ] {
        deployment.annotations.remove(annotation);
    }

    let stored = client.update_deployment(&deployment).await?;
    tracing::info!("Reset deployment {}/{} to New", namespace, stored.name);
    Ok(stored)
}
