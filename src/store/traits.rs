// ABOUTME: Lifecycle client port consumed by the deployment operations.
// ABOUTME: Abstracts get, list, and update calls against the cluster store.

use async_trait::async_trait;

use crate::deploy::{Deployment, DeploymentConfig};

use super::error::StoreError;

/// Store capability the lifecycle operations are written against.
///
/// Implementations must not retry internally: a write conflict is reported as
/// [`StoreError::Conflict`] and left to the caller.
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    /// Fetch one deployment. Absence is reported as [`StoreError::NotFound`].
    async fn get_deployment(&self, namespace: &str, name: &str)
    -> Result<Deployment, StoreError>;

    /// List every deployment owned by a config, across all versions, in no
    /// particular order.
    async fn list_deployments_for_config(
        &self,
        namespace: &str,
        config_name: &str,
    ) -> Result<Vec<Deployment>, StoreError>;

    /// Persist an updated deployment config.
    async fn update_deployment_config(
        &self,
        config: &DeploymentConfig,
    ) -> Result<DeploymentConfig, StoreError>;

    /// Persist an updated deployment record.
    async fn update_deployment(&self, deployment: &Deployment) -> Result<Deployment, StoreError>;
}
