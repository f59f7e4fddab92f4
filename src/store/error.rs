// ABOUTME: Store error types with SNAFU pattern.
// ABOUTME: Distinguishes not-found, write conflicts and availability failures.

use std::fmt;
use std::path::PathBuf;

use snafu::Snafu;

/// Kind of stored object an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    DeploymentConfig,
    Deployment,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::DeploymentConfig => f.write_str("deployment config"),
            ResourceKind::Deployment => f.write_str("deployment"),
        }
    }
}

/// Failure reported by the store behind [`DeploymentClient`](super::DeploymentClient).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    #[snafu(display("{kind} {namespace}/{name} not found"))]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[snafu(display("{kind} {namespace}/{name} already exists"))]
    AlreadyExists {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[snafu(display(
        "conflict updating {kind} {namespace}/{name}: the object has been modified"
    ))]
    Conflict {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[snafu(display("state file {} was modified by another process", path.display()))]
    StaleState { path: PathBuf },

    #[snafu(display(
        "state file {} is locked by another process (remove {} if none is running)",
        path.display(),
        lock.display()
    ))]
    Locked { path: PathBuf, lock: PathBuf },

    #[snafu(display("store unavailable: {message}"))]
    Unavailable { message: String },

    #[snafu(display("failed to access state file {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse state file {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The requested object does not exist.
    NotFound,
    /// The write lost an optimistic-concurrency race.
    Conflict,
    /// The store could not be reached or read.
    Unavailable,
    /// Stored data could not be decoded.
    Corrupt,
}

impl StoreError {
    /// Create an availability error from any message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound { .. } => StoreErrorKind::NotFound,
            StoreError::AlreadyExists { .. }
            | StoreError::Conflict { .. }
            | StoreError::StaleState { .. }
            | StoreError::Locked { .. } => StoreErrorKind::Conflict,
            StoreError::Unavailable { .. } | StoreError::Io { .. } => StoreErrorKind::Unavailable,
            StoreError::Parse { .. } => StoreErrorKind::Corrupt,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == StoreErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == StoreErrorKind::Conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        let not_found = StoreError::NotFound {
            kind: ResourceKind::Deployment,
            namespace: "default".to_string(),
            name: "web-1".to_string(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "deployment default/web-1 not found");

        let stale = StoreError::StaleState {
            path: PathBuf::from("state.yml"),
        };
        assert!(stale.is_conflict());

        assert_eq!(
            StoreError::unavailable("down").kind(),
            StoreErrorKind::Unavailable
        );
    }
}
