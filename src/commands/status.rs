// ABOUTME: Status and history command implementations.
// ABOUTME: Read-only views of a config's latest deployment and all its deployments.

use serde::Serialize;

use super::workspace::Workspace;
use deployctl::deploy::{Deployment, is_cancellation_requested, status_of, version_of};
use deployctl::diagnostics::{Diagnostics, Warning};
use deployctl::error::Result;
use deployctl::output::Output;
use deployctl::store::DeploymentClient;

#[derive(Serialize)]
struct DeploymentRecord {
    name: String,
    version: u64,
    status: Option<String>,
    cancellation_requested: bool,
    latest: bool,
}

#[derive(Serialize)]
struct StatusRecord<'a> {
    namespace: &'a str,
    config: &'a str,
    latest_version: u64,
    deployment: Option<DeploymentRecord>,
}

fn describe(deployment: &Deployment, diag: &mut Diagnostics) -> Option<String> {
    match status_of(deployment) {
        Ok(status) => Some(status.to_string()),
        Err(e) => {
            diag.warn(Warning::unrecognized_status(&e));
            None
        }
    }
}

fn line_for(record: &DeploymentRecord) -> String {
    let mut line = format!(
        "#{:<4} {:<30} {}",
        record.version,
        record.name,
        record.status.as_deref().unwrap_or("Unknown")
    );
    if record.cancellation_requested {
        line.push_str(" (cancellation requested)");
    }
    if record.latest {
        line.push_str(" (latest)");
    }
    line
}

/// Show the latest version of a config and the status of its deployment.
pub async fn status(workspace: &Workspace, name: &str, output: &Output) -> Result<()> {
    let config = workspace.resolve(name)?;
    let mut diag = Diagnostics::default();
    let current = config.latest_deployment_name();

    let deployment = match workspace
        .store()
        .get_deployment(config.namespace.as_str(), &current)
        .await
    {
        Ok(deployment) => Some(DeploymentRecord {
            status: describe(&deployment, &mut diag),
            cancellation_requested: is_cancellation_requested(&deployment),
            name: deployment.name,
            version: config.latest_version,
            latest: true,
        }),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    output.line(&format!("Deployment config: {}/{}", config.namespace, config.name));
    output.line(&format!("Latest version: {}", config.latest_version));
    match &deployment {
        Some(record) => output.line(&line_for(record)),
        None if config.latest_version == 0 => output.line("Never deployed"),
        None => output.line(&format!("Deployment {current} has not been created yet")),
    }

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    output.record(&StatusRecord {
        namespace: config.namespace.as_str(),
        config: config.name.as_str(),
        latest_version: config.latest_version,
        deployment,
    });
    Ok(())
}

/// List every deployment of a config, newest first.
pub async fn history(workspace: &Workspace, name: &str, output: &Output) -> Result<()> {
    let config = workspace.resolve(name)?;
    let mut diag = Diagnostics::default();

    let deployments = workspace
        .store()
        .list_deployments_for_config(config.namespace.as_str(), config.name.as_str())
        .await?;

    let mut records = Vec::with_capacity(deployments.len());
    for deployment in deployments {
        let version = match version_of(&deployment) {
            Ok(version) => version,
            Err(e) => {
                diag.warn(Warning::malformed_record(e.to_string()));
                continue;
            }
        };
        records.push(DeploymentRecord {
            status: describe(&deployment, &mut diag),
            cancellation_requested: is_cancellation_requested(&deployment),
            latest: version == config.latest_version,
            name: deployment.name,
            version,
        });
    }
    records.sort_by(|a, b| b.version.cmp(&a.version));

    if records.is_empty() {
        output.line(&format!("No deployments of {}", config.name));
    }
    for record in &records {
        output.line(&line_for(record));
        output.record(record);
    }
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    Ok(())
}
