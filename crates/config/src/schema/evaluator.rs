//! Schema evaluation: raw environment → `ConfigSnapshot`.
//!
//! Responsibilities:
//! - Walk every field in declaration order and apply required/default policy.
//! - Run each present value through its `[decode?, cast, validate?]` stages.
//! - Stop at the first failure and name the offending source variable.
//!
//! Does NOT handle:
//! - Producing the raw environment (see `loader`).
//!
//! Invariants:
//! - Defaults are used verbatim: never decoded, cast or validated.
//! - A snapshot is returned only if every field resolved.
//! - Sensitive values never reach an error message or a log line.

use std::collections::BTreeMap;

use super::snapshot::{ConfigSnapshot, Namespace};
use super::{Decoder, FieldSpec, Schema, Stage};
use crate::cast::{CastError, Caster, is_recognized_boolean, optionally_decode};
use crate::constants::REDACTED;
use crate::loader::{ConfigError, RawEnvironment};
use crate::types::Value;

/// Resolve every field of `schema` against `raw`.
pub fn evaluate(schema: &Schema, raw: &RawEnvironment) -> Result<ConfigSnapshot, ConfigError> {
    let mut namespaces = BTreeMap::new();

    for namespace in schema.namespaces() {
        let mut resolved = Namespace::default();
        for field in &namespace.fields {
            let value = resolve_field(field, raw)?;
            resolved.insert(field.key.clone(), value, field.sensitive);
        }
        namespaces.insert(namespace.name.clone(), resolved);
    }

    tracing::debug!(
        namespaces = namespaces.len(),
        "configuration snapshot resolved"
    );
    Ok(ConfigSnapshot::from_namespaces(namespaces))
}

/// Intermediate state of one field as it moves through its stages.
enum Pending {
    Raw(String),
    Decoded(Option<String>),
    Cast(Value),
}

fn resolve_field(field: &FieldSpec, raw: &RawEnvironment) -> Result<Value, ConfigError> {
    let Some(raw_value) = raw.get(&field.source_var) else {
        return match (&field.default, field.required) {
            (Some(default), _) => {
                tracing::trace!(var = %field.source_var, origin = "default", "field resolved");
                Ok(default.clone())
            }
            (None, true) => Err(ConfigError::MissingRequiredConfig(field.source_var.clone())),
            (None, false) => {
                tracing::trace!(var = %field.source_var, origin = "nil", "field resolved");
                Ok(Value::Nil)
            }
        };
    };

    let (value, origin) = match run_stages(field, raw_value)? {
        Some(value) => (value, "raw"),
        None => (Value::Nil, "nil"),
    };
    tracing::trace!(var = %field.source_var, origin, "field resolved");
    Ok(value)
}

/// Run a present value through the field's stages. `None` when decoding
/// left nothing to cast.
fn run_stages(field: &FieldSpec, raw_value: &str) -> Result<Option<Value>, ConfigError> {
    let mut state = Pending::Raw(raw_value.to_string());
    for stage in field.stages() {
        state = match (stage, state) {
            (Stage::Decode(Decoder::OptionalBase64), Pending::Raw(text)) => Pending::Decoded(
                optionally_decode(Some(text.as_str())).map_err(|e| cast_failure(field, e))?,
            ),
            (Stage::Cast(caster), Pending::Raw(text) | Pending::Decoded(Some(text))) => {
                warn_on_suspicious_boolean(field, caster, &text);
                Pending::Cast(caster.cast(&text).map_err(|e| cast_failure(field, e))?)
            }
            (Stage::Cast(_), Pending::Decoded(None)) => return Ok(None),
            (Stage::Validate(validator), Pending::Cast(value)) => {
                validator
                    .check(&value)
                    .map_err(|failure| ConfigError::Validation {
                        var: field.source_var.clone(),
                        value: render(field, &value),
                        rule: failure.rule,
                        message: redact(field, failure.message),
                    })?;
                Pending::Cast(value)
            }
            (stage, _) => unreachable!("{stage:?} out of pipeline order"),
        };
    }

    match state {
        Pending::Cast(value) => Ok(Some(value)),
        Pending::Raw(_) | Pending::Decoded(_) => unreachable!("every field has a cast stage"),
    }
}

fn cast_failure(field: &FieldSpec, error: CastError) -> ConfigError {
    match error {
        CastError::InvalidEncoding => ConfigError::InvalidEncoding {
            var: field.source_var.clone(),
        },
        cause => ConfigError::InvalidConfigValue {
            var: field.source_var.clone(),
            cause,
        },
    }
}

fn warn_on_suspicious_boolean(field: &FieldSpec, caster: &Caster, raw: &str) {
    if matches!(caster, Caster::Boolean) && !is_recognized_boolean(raw) {
        tracing::warn!(
            var = %field.source_var,
            "unrecognized boolean token; treating it as false"
        );
    }
}

fn render(field: &FieldSpec, value: &Value) -> String {
    if field.sensitive {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

fn redact(field: &FieldSpec, message: String) -> String {
    if field.sensitive {
        REDACTED.to_string()
    } else {
        message
    }
}
