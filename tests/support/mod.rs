// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted DeploymentClient that records calls, plus fixtures.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Once;

use async_trait::async_trait;
use parking_lot::Mutex;

use deployctl::deploy::{Deployment, DeploymentConfig, DeploymentStatus, make_deployment};
use deployctl::store::{DeploymentClient, ResourceKind, StoreError};
use deployctl::types::ResourceName;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("deployctl=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A config named `config` in `default` at the given version.
pub fn ok_config(version: u64) -> DeploymentConfig {
    let mut config = DeploymentConfig::new(
        ResourceName::new("default").unwrap(),
        ResourceName::new("config").unwrap(),
    );
    config.latest_version = version;
    config.template = serde_json::json!({
        "replicas": 1,
        "containers": [{"name": "app", "image": "registry.local/app:latest"}],
    });
    config
}

/// The deployment materialized for `config` at its latest version, in `status`.
pub fn deployment_for(config: &DeploymentConfig, status: DeploymentStatus) -> Deployment {
    let mut deployment = make_deployment(config);
    deployment.set_status(status);
    deployment
}

/// Calls observed by a [`ScriptedClient`].
#[derive(Debug, Default)]
pub struct Calls {
    pub gets: Vec<String>,
    pub lists: usize,
    pub config_updates: Vec<DeploymentConfig>,
    pub deployment_updates: Vec<Deployment>,
}

/// A client whose answers are fixed up front and whose writes are recorded.
#[derive(Default)]
pub struct ScriptedClient {
    existing: Vec<Deployment>,
    get_error: Option<String>,
    list_error: Option<String>,
    config_update_conflict: bool,
    failing_updates: HashSet<String>,
    calls: Mutex<Calls>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deployments returned by get (by name) and list.
    pub fn with_deployments(mut self, deployments: Vec<Deployment>) -> Self {
        self.existing = deployments;
        self
    }

    pub fn with_deployment(self, deployment: Deployment) -> Self {
        self.with_deployments(vec![deployment])
    }

    /// Make every get fail with an availability error.
    pub fn failing_get(mut self, message: &str) -> Self {
        self.get_error = Some(message.to_string());
        self
    }

    /// Make list fail with an availability error.
    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    /// Reject config updates as stale.
    pub fn conflicting_config_update(mut self) -> Self {
        self.config_update_conflict = true;
        self
    }

    /// Fail updates of the named deployment.
    pub fn failing_update(mut self, name: &str) -> Self {
        self.failing_updates.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> parking_lot::MutexGuard<'_, Calls> {
        self.calls.lock()
    }

    pub fn write_count(&self) -> usize {
        let calls = self.calls.lock();
        calls.config_updates.len() + calls.deployment_updates.len()
    }
}

#[async_trait]
impl DeploymentClient for ScriptedClient {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, StoreError> {
        self.calls.lock().gets.push(name.to_string());
        if let Some(message) = &self.get_error {
            return Err(StoreError::unavailable(message.clone()));
        }
        self.existing
            .iter()
            .find(|d| d.namespace.as_str() == namespace && d.name == name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: ResourceKind::Deployment,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn list_deployments_for_config(
        &self,
        _namespace: &str,
        _config_name: &str,
    ) -> Result<Vec<Deployment>, StoreError> {
        self.calls.lock().lists += 1;
        if let Some(message) = &self.list_error {
            return Err(StoreError::unavailable(message.clone()));
        }
        Ok(self.existing.clone())
    }

    async fn update_deployment_config(
        &self,
        config: &DeploymentConfig,
    ) -> Result<DeploymentConfig, StoreError> {
        if self.config_update_conflict {
            return Err(StoreError::Conflict {
                kind: ResourceKind::DeploymentConfig,
                namespace: config.namespace.to_string(),
                name: config.name.to_string(),
            });
        }
        self.calls.lock().config_updates.push(config.clone());
        Ok(config.clone())
    }

    async fn update_deployment(&self, deployment: &Deployment) -> Result<Deployment, StoreError> {
        if self.failing_updates.contains(&deployment.name) {
            return Err(StoreError::unavailable(format!(
                "write to {} timed out",
                deployment.name
            )));
        }
        self.calls.lock().deployment_updates.push(deployment.clone());
        Ok(deployment.clone())
    }
}
