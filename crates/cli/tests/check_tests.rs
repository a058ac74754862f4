//! Integration tests for the `check` command.

mod common;

use common::switchboard_cmd;
use predicates::prelude::*;

#[test]
fn test_check_reports_namespace_count() {
    switchboard_cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::diff("configuration ok (4 namespaces)\n"));
}

#[test]
fn test_check_resolves_known_strategy() {
    switchboard_cmd()
        .env("CLUSTER_STRATEGY", "gossip")
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_check_rejects_unknown_strategy() {
    switchboard_cmd()
        .env("CLUSTER_STRATEGY", "consul")
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("consul"))
        .stderr(predicate::str::contains("dns_poll"));
}

#[test]
fn test_check_ignores_strategy_when_clustering_disabled() {
    switchboard_cmd()
        .env("CLUSTER_STRATEGY", "consul")
        .env("CLUSTERING_ENABLED", "false")
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_suspicious_boolean_is_logged_not_fatal() {
    switchboard_cmd()
        .env("CLUSTERING_ENABLED", "ture")
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("CLUSTERING_ENABLED"));
}

#[test]
fn test_json_log_format_is_json() {
    let output = switchboard_cmd()
        .env("CLUSTERING_ENABLED", "ture")
        .args(["--log-format", "json", "check"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().expect("expected a warning line");
    let parsed: serde_json::Value = serde_json::from_str(first).expect("log line should be JSON");
    assert_eq!(parsed["level"], "WARN");
}
