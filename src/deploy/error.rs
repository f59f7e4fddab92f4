// ABOUTME: Error types for deployment lifecycle operations.
// ABOUTME: Separates store failures from legality violations and data-integrity errors.

use std::fmt;

use crate::store::StoreError;

use super::status::DeploymentStatus;

/// A deployment record carries a missing or unknown status token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("deployment {deployment} has unrecognized status {}", describe_token(.value))]
pub struct UnrecognizedStatus {
    pub deployment: String,
    pub value: Option<String>,
}

/// Malformed metadata on a deployment record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    #[error("deployment {deployment} has no version annotation")]
    MissingVersion { deployment: String },

    #[error("deployment {deployment} has invalid version {value:?}")]
    InvalidVersion { deployment: String, value: String },
}

/// A deployment that could not be cancelled, with the store error that stopped it.
#[derive(Debug)]
pub struct CancelFailure {
    pub deployment: String,
    pub error: StoreError,
}

impl fmt::Display for CancelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.deployment, self.error)
    }
}

/// Errors returned by the start-latest, retry and cancel operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The store could not complete a read or write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A non-terminal deployment already exists for the latest version.
    #[error("deployment {deployment} is already in progress ({status})")]
    InProgress {
        deployment: String,
        status: DeploymentStatus,
    },

    /// Only failed deployments can be retried.
    #[error("{}", describe_not_retryable(.deployment, .found))]
    NotRetryable {
        deployment: String,
        found: Option<DeploymentStatus>,
    },

    #[error(transparent)]
    UnrecognizedStatus(#[from] UnrecognizedStatus),

    #[error(transparent)]
    Accessor(#[from] AccessorError),

    /// The config's version counter cannot be advanced.
    #[error("deployment config {config} cannot advance past version {version}")]
    VersionOverflow { config: String, version: u64 },

    /// Some cancellation writes failed; the others were still attempted.
    #[error("failed to cancel {} deployment(s): {}", .failures.len(), join_failures(.failures))]
    CancelIncomplete {
        failures: Vec<CancelFailure>,
        cancelled: Vec<String>,
        /// Deployments skipped because their status could not be classified.
        skipped: Vec<UnrecognizedStatus>,
    },
}

fn describe_token(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "(missing)".to_string(),
    }
}

fn describe_not_retryable(deployment: &str, found: &Option<DeploymentStatus>) -> String {
    match found {
        Some(status) => format!(
            "only failed deployments can be retried: {deployment} is {status}"
        ),
        None => format!("no deployment {deployment} to retry"),
    }
}

fn join_failures(failures: &[CancelFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
