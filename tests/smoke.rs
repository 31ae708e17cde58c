//! Smoke tests -- verify the binary runs and the CLI surface is intact.

use std::io::Write;

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "Multi-domain anomaly detection and Bayesian correlation fusion",
        ));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("sentinelfuse"));
}

#[test]
fn test_detect_subcommand_exists() {
    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .args(["detect", "--help"])
        .assert()
        .success();
}

#[test]
fn test_fuse_subcommand_exists() {
    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .args(["fuse", "--help"])
        .assert()
        .success();
}

#[test]
fn test_pipeline_runs_end_to_end() {
    let mut events = tempfile::NamedTempFile::new().unwrap();
    write!(
        events,
        r#"[
            {{"id":"e1","timestamp":"2024-03-10T00:00:00Z","entityId":"x","domain":"orbital","metrics":{{"m":10}},"source":"test"}},
            {{"id":"e2","timestamp":"2024-03-10T00:01:00Z","entityId":"x","domain":"orbital","metrics":{{"m":11}},"source":"test"}},
            {{"id":"e3","timestamp":"2024-03-10T00:02:00Z","entityId":"x","domain":"orbital","metrics":{{"m":1000}},"source":"test"}}
        ]"#
    )
    .unwrap();

    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .args(["pipeline", "--events"])
        .arg(events.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("correlations"))
        .stdout(predicates::str::contains("posterior"));
}

#[test]
fn test_detect_rejects_malformed_events_file() {
    let mut events = tempfile::NamedTempFile::new().unwrap();
    write!(events, "not json").unwrap();

    Command::cargo_bin("sentinelfuse")
        .unwrap()
        .args(["detect", "--events"])
        .arg(events.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to parse events file"));
}
