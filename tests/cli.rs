// ABOUTME: Integration tests for the deployctl CLI commands.
// ABOUTME: Drives latest, retry, cancel, status, and history against a state file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn deployctl_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deployctl"));
    cmd.current_dir(dir);
    cmd
}

fn deployment_yaml(config: &str, version: u64, status: &str) -> String {
    format!(
        r#"- namespace: default
  name: {config}-{version}
  annotations:
    deployctl.io/deployment.config: {config}
    deployctl.io/deployment.version: "{version}"
    deployctl.io/deployment.status: {status}
  resource_version: 1
"#
    )
}

/// Write a state file with config `web` at `version` and the given deployments.
fn write_state(dir: &Path, version: u64, deployments: &[(u64, &str)]) {
    let mut yaml = format!(
        r#"generation: 3
configs:
- namespace: default
  name: web
  latest_version: {version}
  resource_version: 1
deployments:
"#
    );
    if deployments.is_empty() {
        yaml = yaml.replace("deployments:\n", "deployments: []\n");
    }
    for (v, status) in deployments {
        yaml.push_str(&deployment_yaml("web", *v, status));
    }
    let state_dir = dir.join(".deployctl");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(state_dir.join("state.yml"), yaml).unwrap();
}

fn read_state(dir: &Path) -> String {
    fs::read_to_string(dir.join(".deployctl/state.yml")).unwrap()
}

#[test]
fn help_shows_commands() {
    let dir = tempfile::tempdir().unwrap();
    deployctl_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest"))
        .stdout(predicate::str::contains("retry"))
        .stdout(predicate::str::contains("cancel"));
}

#[test]
fn init_creates_config_file() {
    let dir = tempfile::tempdir().unwrap();

    deployctl_cmd(dir.path()).arg("init").assert().success();

    let content = fs::read_to_string(dir.path().join("deployctl.yml")).unwrap();
    assert!(content.contains("namespace: default"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("deployctl.yml"), "namespace: default\n").unwrap();

    deployctl_cmd(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn latest_advances_version_after_complete_deployment() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Complete")]);

    deployctl_cmd(dir.path())
        .args(["latest", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started deployment #2 of web"));

    let state = read_state(dir.path());
    assert!(state.contains("latest_version: 2"));
    assert!(state.contains("generation: 4"));
}

#[test]
fn latest_rejects_running_deployment() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Running")]);
    let before = read_state(dir.path());

    deployctl_cmd(dir.path())
        .args(["latest", "web"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already in progress (Running)"));

    assert_eq!(read_state(dir.path()), before, "no write on rejection");
}

#[test]
fn retry_resets_failed_deployment() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Failed")]);

    deployctl_cmd(dir.path())
        .args(["retry", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Retried deployment web-1"));

    let state = read_state(dir.path());
    assert!(state.contains("deployctl.io/deployment.status: New"));
    assert!(state.contains("latest_version: 1"));
}

#[test]
fn retry_rejects_complete_deployment() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Complete")]);

    deployctl_cmd(dir.path())
        .args(["retry", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("web-1 is Complete"));
}

#[test]
fn cancel_marks_only_active_deployments() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 3, &[(3, "Running"), (2, "Complete"), (1, "Failed")]);

    deployctl_cmd(dir.path())
        .args(["cancel", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requested cancellation of 1 deployment(s)"));

    let state = read_state(dir.path());
    assert_eq!(state.matches("deployctl.io/deployment.cancelled:").count(), 1);
    assert!(state.contains("deployctl.io/deployment.status: Running"));
}

#[test]
fn cancel_warns_about_unrecognized_status() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 2, &[(2, "Running"), (1, "Paused")]);

    deployctl_cmd(dir.path())
        .args(["cancel", "web"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped: deployment web-1"))
        .stdout(predicate::str::contains("Requested cancellation of 1 deployment(s)"));
}

#[test]
fn locked_state_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Complete")]);
    fs::write(dir.path().join(".deployctl/state.yml.lock"), "other-host 4242\n").unwrap();
    let before = read_state(dir.path());

    deployctl_cmd(dir.path())
        .args(["latest", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked by another process"));

    assert_eq!(read_state(dir.path()), before);
}

#[test]
fn cancel_with_nothing_active_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Complete")]);

    deployctl_cmd(dir.path())
        .args(["cancel", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active deployments"));
}

#[test]
fn status_and_history_describe_deployments() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 2, &[(2, "Running"), (1, "Complete")]);

    deployctl_cmd(dir.path())
        .args(["status", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest version: 2"))
        .stdout(predicate::str::contains("Running"));

    deployctl_cmd(dir.path())
        .args(["--json", "history", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"web-2""#))
        .stdout(predicate::str::contains(r#""status":"Complete""#));
}

#[test]
fn unknown_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[]);

    deployctl_cmd(dir.path())
        .args(["latest", "api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default/api not found"));
}

#[test]
fn namespace_flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_state(dir.path(), 1, &[(1, "Complete")]);

    deployctl_cmd(dir.path())
        .args(["--namespace", "staging", "latest", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging/web not found"));
}
