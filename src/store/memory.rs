// ABOUTME: In-memory deployment store with optimistic concurrency.
// ABOUTME: Backs the CLI state file and stands in for the cluster API in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::deploy::{
    CONFIG_ANNOTATION, Deployment, DeploymentConfig, DeploymentStatus, deployment_name_for,
    make_deployment,
};

use super::error::{ResourceKind, StoreError};
use super::traits::DeploymentClient;

type Key = (String, String);

/// Serializable contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub configs: Vec<DeploymentConfig>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

#[derive(Debug, Default)]
struct Objects {
    configs: BTreeMap<Key, DeploymentConfig>,
    deployments: BTreeMap<Key, Deployment>,
}

/// Thread-safe store keyed by namespace and name.
///
/// Every write must carry the `resource_version` it was read at; a mismatch is
/// rejected with [`StoreError::Conflict`] and a successful write bumps it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<Objects>,
}

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

fn not_found(kind: ResourceKind, namespace: &str, name: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        namespace: namespace.to_string(),
        name: name.to_string(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, keeping stored resource versions.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut objects = Objects::default();
        for config in snapshot.configs {
            objects
                .configs
                .insert(key(config.namespace.as_str(), config.name.as_str()), config);
        }
        for deployment in snapshot.deployments {
            objects.deployments.insert(
                key(deployment.namespace.as_str(), &deployment.name),
                deployment,
            );
        }
        Self {
            objects: RwLock::new(objects),
        }
    }

    /// Copy the current contents out, ordered by namespace and name.
    pub fn snapshot(&self) -> Snapshot {
        let objects = self.objects.read();
        Snapshot {
            configs: objects.configs.values().cloned().collect(),
            deployments: objects.deployments.values().cloned().collect(),
        }
    }

    /// Create a deployment config.
    pub fn create_config(&self, config: DeploymentConfig) -> Result<DeploymentConfig, StoreError> {
        let mut objects = self.objects.write();
        let k = key(config.namespace.as_str(), config.name.as_str());
        if objects.configs.contains_key(&k) {
            return Err(StoreError::AlreadyExists {
                kind: ResourceKind::DeploymentConfig,
                namespace: k.0,
                name: k.1,
            });
        }
        let mut config = config;
        config.resource_version = 1;
        objects.configs.insert(k, config.clone());
        Ok(config)
    }

    /// Create a deployment record.
    pub fn create_deployment(&self, deployment: Deployment) -> Result<Deployment, StoreError> {
        let mut objects = self.objects.write();
        let k = key(deployment.namespace.as_str(), &deployment.name);
        if objects.deployments.contains_key(&k) {
            return Err(StoreError::AlreadyExists {
                kind: ResourceKind::Deployment,
                namespace: k.0,
                name: k.1,
            });
        }
        let mut deployment = deployment;
        deployment.resource_version = 1;
        objects.deployments.insert(k, deployment.clone());
        Ok(deployment)
    }

    /// Fetch a deployment config.
    pub fn get_config(&self, namespace: &str, name: &str) -> Result<DeploymentConfig, StoreError> {
        self.objects
            .read()
            .configs
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| not_found(ResourceKind::DeploymentConfig, namespace, name))
    }

    /// Create the deployment for a config's latest version if it is missing.
    ///
    /// This is the controller's half of the version-bump contract.
    pub fn materialize_latest(
        &self,
        namespace: &str,
        config_name: &str,
    ) -> Result<Deployment, StoreError> {
        let config = self.get_config(namespace, config_name)?;
        let name = deployment_name_for(&config.name, config.latest_version);
        if let Some(existing) = self.objects.read().deployments.get(&key(namespace, &name)) {
            return Ok(existing.clone());
        }
        tracing::debug!("Materializing deployment {}/{}", namespace, name);
        self.create_deployment(make_deployment(&config))
    }

    /// Overwrite a deployment's status the way the controller does.
    pub fn set_status(
        &self,
        namespace: &str,
        name: &str,
        status: DeploymentStatus,
    ) -> Result<Deployment, StoreError> {
        let mut objects = self.objects.write();
        let deployment = objects
            .deployments
            .get_mut(&key(namespace, name))
            .ok_or_else(|| not_found(ResourceKind::Deployment, namespace, name))?;
        deployment.set_status(status);
        deployment.resource_version += 1;
        Ok(deployment.clone())
    }
}

#[async_trait]
impl DeploymentClient for MemoryStore {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, StoreError> {
        self.objects
            .read()
            .deployments
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| not_found(ResourceKind::Deployment, namespace, name))
    }

    async fn list_deployments_for_config(
        &self,
        namespace: &str,
        config_name: &str,
    ) -> Result<Vec<Deployment>, StoreError> {
        let objects = self.objects.read();
        Ok(objects
            .deployments
            .values()
            .filter(|d| d.namespace.as_str() == namespace)
            .filter(|d| {
                d.annotations
                    .get(CONFIG_ANNOTATION)
                    .is_some_and(|owner| owner == config_name)
            })
            .cloned()
            .collect())
    }

    async fn update_deployment_config(
        &self,
        config: &DeploymentConfig,
    ) -> Result<DeploymentConfig, StoreError> {
        let mut objects = self.objects.write();
        let (namespace, name) = (config.namespace.as_str(), config.name.as_str());
        let stored = objects
            .configs
            .get_mut(&key(namespace, name))
            .ok_or_else(|| not_found(ResourceKind::DeploymentConfig, namespace, name))?;

        if stored.resource_version != config.resource_version {
            return Err(StoreError::Conflict {
                kind: ResourceKind::DeploymentConfig,
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }

        *stored = config.clone();
        stored.resource_version += 1;
        Ok(stored.clone())
    }

    async fn update_deployment(&self, deployment: &Deployment) -> Result<Deployment, StoreError> {
        let mut objects = self.objects.write();
        let (namespace, name) = (deployment.namespace.as_str(), deployment.name.as_str());
        let stored = objects
            .deployments
            .get_mut(&key(namespace, name))
            .ok_or_else(|| not_found(ResourceKind::Deployment, namespace, name))?;

        if stored.resource_version != deployment.resource_version {
            return Err(StoreError::Conflict {
                kind: ResourceKind::Deployment,
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }

        *stored = deployment.clone();
        stored.resource_version += 1;
        Ok(stored.clone())
    }
}
