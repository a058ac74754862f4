//! Integration tests for the `schema` command.

mod common;

use common::switchboard_cmd;

#[test]
fn test_schema_prints_every_namespace_in_order() {
    let output = switchboard_cmd().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = schema
        .as_array()
        .unwrap()
        .iter()
        .map(|ns| ns["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["endpoint", "secrets", "runtime", "cluster"]);

    let token = &schema[0]["fields"][0];
    assert_eq!(token["source_var"], "API_TOKEN");
    assert_eq!(token["required"], true);
    assert_eq!(token["sensitive"], true);
}

#[test]
fn test_schema_needs_no_configuration() {
    let mut cmd = switchboard_cmd();
    cmd.env_remove("API_TOKEN");
    cmd.arg("schema").assert().success();
}
