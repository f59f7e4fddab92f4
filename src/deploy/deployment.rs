// ABOUTME: Deployment config and deployment records plus read-side accessors.
// ABOUTME: Status, version and owner live in string annotations on the record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ResourceName;

use super::error::{AccessorError, UnrecognizedStatus};
use super::status::DeploymentStatus;

/// Annotation holding the deployment status token.
pub const STATUS_ANNOTATION: &str = "deployctl.io/deployment.status";
/// Annotation holding the config version the deployment was created from.
pub const VERSION_ANNOTATION: &str = "deployctl.io/deployment.version";
/// Annotation naming the owning deployment config.
pub const CONFIG_ANNOTATION: &str = "deployctl.io/deployment.config";
/// Annotation set to [`CANCELLED_VALUE`] when cancellation was requested.
pub const CANCELLED_ANNOTATION: &str = "deployctl.io/deployment.cancelled";
/// Value of [`CANCELLED_ANNOTATION`] on a deployment whose cancellation was requested.
pub const CANCELLED_VALUE: &str = "true";
/// Human-readable reason for the current status.
pub const STATUS_REASON_ANNOTATION: &str = "deployctl.io/deployment.status-reason";
/// Host that requested the cancellation.
pub const CANCELLED_BY_ANNOTATION: &str = "deployctl.io/deployment.cancelled-by";
/// RFC 3339 time the cancellation was requested.
pub const CANCELLED_AT_ANNOTATION: &str = "deployctl.io/deployment.cancelled-at";

/// A named, versioned template from which deployments are instantiated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub namespace: ResourceName,
    pub name: ResourceName,
    #[serde(default)]
    pub latest_version: u64,
    #[serde(default)]
    pub template: serde_json::Value,
    /// Store-assigned revision for optimistic concurrency.
    #[serde(default)]
    pub resource_version: u64,
}

impl DeploymentConfig {
    pub fn new(namespace: ResourceName, name: ResourceName) -> Self {
        Self {
            namespace,
            name,
            latest_version: 0,
            template: serde_json::Value::Null,
            resource_version: 0,
        }
    }

    /// Name of the deployment materialized for `latest_version`.
    pub fn latest_deployment_name(&self) -> String {
        deployment_name_for(&self.name, self.latest_version)
    }
}

/// A materialized, versioned instance of a deployment config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub namespace: ResourceName,
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub template: serde_json::Value,
    #[serde(default)]
    pub resource_version: u64,
}

impl Deployment {
    /// Overwrite the status annotation.
    pub fn set_status(&mut self, status: DeploymentStatus) {
        self.annotations
            .insert(STATUS_ANNOTATION.to_string(), status.as_str().to_string());
    }
}

/// Deterministic deployment name for a config at a given version.
pub fn deployment_name_for(config_name: &ResourceName, version: u64) -> String {
    format!("{}-{}", config_name, version)
}

/// Parse the status annotation of a deployment.
///
/// A missing annotation or an unknown token is an error; no default status is
/// ever assumed.
pub fn status_of(deployment: &Deployment) -> Result<DeploymentStatus, UnrecognizedStatus> {
    let raw = deployment.annotations.get(STATUS_ANNOTATION);
    raw.and_then(|value| value.parse().ok())
        .ok_or_else(|| UnrecognizedStatus {
            deployment: deployment.name.clone(),
            value: raw.cloned(),
        })
}

/// Read the config version a deployment was created from.
pub fn version_of(deployment: &Deployment) -> Result<u64, AccessorError> {
    let raw = deployment
        .annotations
        .get(VERSION_ANNOTATION)
        .ok_or_else(|| AccessorError::MissingVersion {
            deployment: deployment.name.clone(),
        })?;

    raw.parse().map_err(|_| AccessorError::InvalidVersion {
        deployment: deployment.name.clone(),
        value: raw.clone(),
    })
}

/// Name of the config that owns the deployment, if recorded.
pub fn config_name_of(deployment: &Deployment) -> Option<&str> {
    deployment
        .annotations
        .get(CONFIG_ANNOTATION)
        .map(String::as_str)
}

/// Whether a cancellation has been requested for the deployment.
pub fn is_cancellation_requested(deployment: &Deployment) -> bool {
    deployment
        .annotations
        .get(CANCELLED_ANNOTATION)
        .is_some_and(|v| v == CANCELLED_VALUE)
}

/// Build the `New` deployment record for the config's latest version.
///
/// This is what the controller does when it observes a version bump.
pub fn make_deployment(config: &DeploymentConfig) -> Deployment {
    let mut annotations = BTreeMap::new();
    annotations.insert(CONFIG_ANNOTATION.to_string(), config.name.to_string());
    annotations.insert(
        VERSION_ANNOTATION.to_string(),
        config.latest_version.to_string(),
    );

    let mut deployment = Deployment {
        namespace: config.namespace.clone(),
        name: config.latest_deployment_name(),
        annotations,
        template: config.template.clone(),
        resource_version: 0,
    };
    deployment.set_status(DeploymentStatus::New);
    deployment
}
