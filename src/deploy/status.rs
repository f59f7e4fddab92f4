// ABOUTME: Deployment status model and its annotation encoding.
// ABOUTME: Defines the terminal/non-terminal partition used by every operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a deployment.
///
/// Stored on the deployment record as the string token returned by
/// [`DeploymentStatus::as_str`]. Parsing fails closed: any token outside this
/// set is rejected rather than mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentStatus {
    /// Materialized but not yet picked up by the controller.
    New,
    /// Accepted by the controller, workload not yet running.
    Pending,
    /// Workload rollout in progress.
    Running,
    /// Finished successfully.
    Complete,
    /// Finished unsuccessfully (including after a cancellation).
    Failed,
}

impl DeploymentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [DeploymentStatus; 5] = [
        DeploymentStatus::New,
        DeploymentStatus::Pending,
        DeploymentStatus::Running,
        DeploymentStatus::Complete,
        DeploymentStatus::Failed,
    ];

    /// Whether the deployment will not transition any further on its own.
    pub fn is_terminal(self) -> bool {
        match self {
            DeploymentStatus::Complete | DeploymentStatus::Failed => true,
            DeploymentStatus::New | DeploymentStatus::Pending | DeploymentStatus::Running => false,
        }
    }

    /// The wire token stored in the status annotation.
    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentStatus::New => "New",
            DeploymentStatus::Pending => "Pending",
            DeploymentStatus::Running => "Running",
            DeploymentStatus::Complete => "Complete",
            DeploymentStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status token that is not part of the known enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized deployment status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for DeploymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeploymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
