//! Basic loader tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test building a snapshot from an explicit variable layer.
//! - Test missing-required and invalid-value errors surface from `build`.

use crate::cast::Caster;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::schema::{FieldSpec, NamespaceSpec, Schema};
use crate::types::Value;

fn web_schema() -> Schema {
    Schema::new(vec![
        NamespaceSpec::new("web")
            .field(FieldSpec::new("host", "WEB_HOST", Caster::String).required())
            .field(FieldSpec::new("port", "WEB_PORT", Caster::Integer).with_default(4000_i64)),
    ])
    .unwrap()
}

#[test]
fn test_loader_with_vars() {
    let snapshot = ConfigLoader::new()
        .with_vars([("WEB_HOST", "example.test"), ("WEB_PORT", "8080")])
        .build(&web_schema())
        .unwrap();

    assert_eq!(snapshot.get_str("web", "host"), Some("example.test"));
    assert_eq!(snapshot.get_integer("web", "port"), Some(8080));
}

#[test]
fn test_loader_default_used_when_absent() {
    let snapshot = ConfigLoader::new()
        .with_vars([("WEB_HOST", "example.test")])
        .build(&web_schema())
        .unwrap();

    assert_eq!(snapshot.get("web", "port"), Some(&Value::Integer(4000)));
}

#[test]
fn test_loader_missing_required() {
    let result = ConfigLoader::new()
        .with_vars(Vec::<(String, String)>::new())
        .build(&web_schema());

    match result {
        Err(ConfigError::MissingRequiredConfig(var)) => assert_eq!(var, "WEB_HOST"),
        other => panic!("expected MissingRequiredConfig, got {other:?}"),
    }
}

#[test]
fn test_loader_invalid_value() {
    let result = ConfigLoader::new()
        .with_vars([("WEB_HOST", "example.test"), ("WEB_PORT", "eighty")])
        .build(&web_schema());

    assert!(matches!(
        result,
        Err(ConfigError::InvalidConfigValue { ref var, .. }) if var == "WEB_PORT"
    ));
}

#[test]
fn test_raw_exposes_merged_layer() {
    let loader = ConfigLoader::new().with_vars([("A", "1")]);
    let raw = loader.raw();
    assert_eq!(raw.get("A"), Some("1"));
    assert_eq!(loader.environment(), "dev");
}
