// ABOUTME: Cancel operation: requests cancellation of every active deployment of a config.
// ABOUTME: Best-effort across versions; write failures are collected, not fatal to the scan.

use chrono::{DateTime, Utc};

use crate::store::DeploymentClient;

use super::deployment::{
    CANCELLED_ANNOTATION, CANCELLED_AT_ANNOTATION, CANCELLED_BY_ANNOTATION, CANCELLED_VALUE,
    Deployment, DeploymentConfig, STATUS_REASON_ANNOTATION, status_of,
};
use super::error::{CancelFailure, LifecycleError, UnrecognizedStatus};

/// Status reason recorded on cancelled deployments.
pub const CANCELLED_BY_USER: &str = "cancelled by user";

/// Who asked for a cancellation and when.
#[derive(Debug, Clone)]
pub struct CancelRequest {
    /// Hostname of the machine issuing the request.
    pub requested_by: String,
    pub requested_at: DateTime<Utc>,
}

impl CancelRequest {
    /// Create a request attributed to the current host.
    pub fn new() -> Self {
        Self {
            requested_by: gethostname::gethostname().to_string_lossy().into_owned(),
            requested_at: Utc::now(),
        }
    }

    /// Stamp the cancellation marker onto a deployment record.
    pub fn apply(&self, deployment: &mut Deployment) {
        let annotations = &mut deployment.annotations;
        annotations.insert(
            CANCELLED_ANNOTATION.to_string(),
            CANCELLED_VALUE.to_string(),
        );
        annotations.insert(
            STATUS_REASON_ANNOTATION.to_string(),
            CANCELLED_BY_USER.to_string(),
        );
        annotations.insert(
            CANCELLED_BY_ANNOTATION.to_string(),
            self.requested_by.clone(),
        );
        annotations.insert(
            CANCELLED_AT_ANNOTATION.to_string(),
            self.requested_at.to_rfc3339(),
        );
    }
}

impl Default for CancelRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a cancel pass in which every write succeeded.
#[derive(Debug, Default)]
pub struct CancelReport {
    /// Deployments that now carry a cancellation request.
    pub cancelled: Vec<String>,
    /// Deployments skipped because their status could not be classified.
    pub skipped: Vec<UnrecognizedStatus>,
}

impl CancelReport {
    /// True when there was no active deployment to cancel.
    pub fn is_empty(&self) -> bool {
        self.cancelled.is_empty()
    }
}

/// Request cancellation of every non-terminal deployment of a config.
///
/// All versions are considered, not just the latest. Terminal deployments
/// are never written. Records with an unrecognized status are skipped and
/// reported.
///
/// # Errors
///
/// - `LifecycleError::Store` if the deployments cannot be listed.
/// - `LifecycleError::CancelIncomplete` if any update failed. The remaining
///   candidates are still attempted before returning, and the error carries
///   both the successful cancellations and the skipped records.
pub async fn cancel<C: DeploymentClient + ?Sized>(
    client: &C,
    config: &DeploymentConfig,
    request: &CancelRequest,
) -> Result<CancelReport, LifecycleError> {
    let namespace = config.namespace.as_str();
    let deployments = client
        .list_deployments_for_config(namespace, config.name.as_str())
        .await?;

    let mut report = CancelReport::default();
    let mut failures = Vec::new();

    for mut deployment in deployments {
        let status = match status_of(&deployment) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Skipping {}/{}: {}", namespace, deployment.name, e);
                report.skipped.push(e);
                continue;
            }
        };

        if status.is_terminal() {
            tracing::debug!(
                "Leaving {}/{} untouched ({})",
                namespace,
                deployment.name,
                status
            );
            continue;
        }

        request.apply(&mut deployment);
        match client.update_deployment(&deployment).await {
            Ok(stored) => {
                tracing::info!(
                    "Requested cancellation of {}/{} ({})",
                    namespace,
                    stored.name,
                    status
                );
                report.cancelled.push(stored.name);
            }
            Err(error) => {
                tracing::warn!(
                    "Failed to cancel {}/{}: {}",
                    namespace,
                    deployment.name,
                    error
                );
                failures.push(CancelFailure {
                    deployment: deployment.name,
                    error,
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(LifecycleError::CancelIncomplete {
            failures,
            cancelled: report.cancelled,
            skipped: report.skipped,
        });
    }

    Ok(report)
}
