// ABOUTME: Cancel command implementation.
// ABOUTME: Requests cancellation of every in-progress deployment of a config.

use super::workspace::Workspace;
use deployctl::deploy::{CancelRequest, LifecycleError, cancel as cancel_deployments};
use deployctl::diagnostics::{Diagnostics, Warning};
use deployctl::error::Result;
use deployctl::output::Output;

/// Cancel in-progress deployments of the named config.
pub async fn cancel(workspace: Workspace, name: &str, output: &Output) -> Result<()> {
    let config = workspace.resolve(name)?;
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Cancelling deployments of {}/{}",
        config.namespace, config.name
    ));

    let result = cancel_deployments(workspace.store(), &config, &CancelRequest::new()).await;

    // Successful writes are kept even when some others failed.
    let (cancelled, skipped) = match &result {
        Ok(report) => (report.cancelled.as_slice(), report.skipped.as_slice()),
        Err(LifecycleError::CancelIncomplete {
            cancelled, skipped, ..
        }) => (cancelled.as_slice(), skipped.as_slice()),
        Err(_) => (&[][..], &[][..]),
    };
    for record in skipped {
        diag.warn(Warning::unrecognized_status(record));
    }
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
    if !cancelled.is_empty() {
        workspace.commit()?;
    }

    let report = result?;
    if report.is_empty() {
        output.success(&format!("No active deployments of {} to cancel", config.name));
    } else {
        for name in &report.cancelled {
            output.progress(&format!("  → Cancelled {name}"));
        }
        output.success(&format!(
            "Requested cancellation of {} deployment(s) of {}",
            report.cancelled.len(),
            config.name
        ));
    }
    Ok(())
}
