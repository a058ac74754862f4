//! Declarative configuration schema.
//!
//! Responsibilities:
//! - Describe each configuration key as data: source variable, required flag,
//!   typed default, optional decode stage, caster and optional validator.
//! - Group fields into ordered namespaces and check the schema's own invariants.
//! - Evaluate a schema against a raw environment into a `ConfigSnapshot`.
//!
//! Does NOT handle:
//! - Reading dotenv files or the process environment (see `loader`).
//! - The casting and validation primitives themselves (see `cast`, `validate`).
//!
//! Invariants:
//! - Keys are unique within a namespace; namespace names are unique within a schema.
//! - A default always has the shape its caster would produce (or is nil).
//! - Declaration order is evaluation order, so the first reported failure is stable.

mod evaluator;
mod snapshot;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::cast::Caster;
use crate::types::{Value, ValueKind};
use crate::validate::Validator;

pub use evaluator::evaluate;
pub use snapshot::{ConfigSnapshot, Namespace};

/// Schema construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("namespace '{0}' is declared more than once")]
    DuplicateNamespace(String),

    #[error("key '{key}' is declared more than once in namespace '{namespace}'")]
    DuplicateKey { namespace: String, key: String },

    #[error("default for {namespace}.{key} is a {found}, but its caster produces {caster}")]
    DefaultTypeMismatch {
        namespace: String,
        key: String,
        caster: String,
        found: ValueKind,
    },
}

/// Decode stage that runs before the cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoder {
    /// `base64:`-prefixed or plain text; see `cast::optionally_decode`.
    OptionalBase64,
}

/// One stage of a field's pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage<'a> {
    Decode(Decoder),
    Cast(&'a Caster),
    Validate(&'a Validator),
}

/// A single configuration key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub source_var: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder: Option<Decoder>,
    pub caster: Caster,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,
    /// Sensitive values are never rendered in errors, logs or displays.
    #[serde(default)]
    pub sensitive: bool,
}

impl FieldSpec {
    /// An optional field with no default, read from `source_var`.
    pub fn new(key: impl Into<String>, source_var: impl Into<String>, caster: Caster) -> Self {
        Self {
            key: key.into(),
            source_var: source_var.into(),
            required: false,
            default: None,
            decoder: None,
            caster,
            validator: None,
            sensitive: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The field's pipeline: `[decode?, cast, validate?]`.
    pub fn stages(&self) -> Vec<Stage<'_>> {
        let mut stages = Vec::with_capacity(3);
        if let Some(decoder) = self.decoder {
            stages.push(Stage::Decode(decoder));
        }
        stages.push(Stage::Cast(&self.caster));
        if let Some(validator) = &self.validator {
            stages.push(Stage::Validate(validator));
        }
        stages
    }
}

/// An ordered group of fields belonging to one subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl NamespaceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// A checked, ordered set of namespaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NamespaceSpec>", into = "Vec<NamespaceSpec>")]
pub struct Schema {
    namespaces: Vec<NamespaceSpec>,
}

impl Schema {
    pub fn new(namespaces: Vec<NamespaceSpec>) -> Result<Self, SchemaError> {
        let mut seen_namespaces = HashSet::new();
        for namespace in &namespaces {
            if !seen_namespaces.insert(namespace.name.as_str()) {
                return Err(SchemaError::DuplicateNamespace(namespace.name.clone()));
            }

            let mut seen_keys = HashSet::new();
            for field in &namespace.fields {
                if !seen_keys.insert(field.key.as_str()) {
                    return Err(SchemaError::DuplicateKey {
                        namespace: namespace.name.clone(),
                        key: field.key.clone(),
                    });
                }
                if let Some(default) = &field.default {
                    if !field.caster.produces(default) {
                        return Err(SchemaError::DefaultTypeMismatch {
                            namespace: namespace.name.clone(),
                            key: field.key.clone(),
                            caster: field.caster.to_string(),
                            found: default.kind(),
                        });
                    }
                }
            }
        }

        Ok(Self { namespaces })
    }

    pub fn namespaces(&self) -> &[NamespaceSpec] {
        &self.namespaces
    }

    /// Every field with its namespace name, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.fields.iter().map(move |f| (ns.name.as_str(), f)))
    }
}

impl TryFrom<Vec<NamespaceSpec>> for Schema {
    type Error = SchemaError;

    fn try_from(namespaces: Vec<NamespaceSpec>) -> Result<Self, Self::Error> {
        Self::new(namespaces)
    }
}

impl From<Schema> for Vec<NamespaceSpec> {
    fn from(schema: Schema) -> Self {
        schema.namespaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::{ItemCaster, JsonShape, KeyStyle};

    #[test]
    fn test_stages_are_ordered() {
        let field = FieldSpec::new("creds", "CREDS", Caster::String)
            .with_validator(Validator::NonEmpty)
            .with_decoder(Decoder::OptionalBase64);

        let stages = field.stages();
        assert_eq!(stages.len(), 3);
        assert!(matches!(stages[0], Stage::Decode(Decoder::OptionalBase64)));
        assert!(matches!(stages[1], Stage::Cast(Caster::String)));
        assert!(matches!(stages[2], Stage::Validate(Validator::NonEmpty)));
    }

    #[test]
    fn test_cast_is_the_only_mandatory_stage() {
        let field = FieldSpec::new("port", "PORT", Caster::Integer);
        assert_eq!(field.stages(), vec![Stage::Cast(&Caster::Integer)]);
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let result = Schema::new(vec![
            NamespaceSpec::new("http")
                .field(FieldSpec::new("port", "PORT", Caster::Integer))
                .field(FieldSpec::new("port", "HTTP_PORT", Caster::Integer)),
        ]);
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateKey {
                namespace: "http".to_string(),
                key: "port".to_string()
            }
        );
    }

    #[test]
    fn test_same_key_in_different_namespaces_is_fine() {
        let result = Schema::new(vec![
            NamespaceSpec::new("http").field(FieldSpec::new("port", "HTTP_PORT", Caster::Integer)),
            NamespaceSpec::new("admin")
                .field(FieldSpec::new("port", "ADMIN_PORT", Caster::Integer)),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_namespace_is_rejected() {
        let result = Schema::new(vec![NamespaceSpec::new("a"), NamespaceSpec::new("a")]);
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateNamespace("a".to_string())
        );
    }

    #[test]
    fn test_default_must_match_caster() {
        let result = Schema::new(vec![NamespaceSpec::new("cluster").field(
            FieldSpec::new("enabled", "CLUSTERING_ENABLED", Caster::Boolean)
                .with_default("true"),
        )]);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DefaultTypeMismatch {
                found: ValueKind::Text,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "default for cluster.enabled is a string, but its caster produces boolean"
        );
    }

    #[test]
    fn test_nil_default_fits_any_caster() {
        let result = Schema::new(vec![NamespaceSpec::new("secrets").field(
            FieldSpec::new(
                "blob",
                "BLOB",
                Caster::Json {
                    shape: JsonShape::Map,
                    keys: KeyStyle::Atoms,
                },
            )
            .with_default(Value::Nil),
        )]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_schema_serde_roundtrip_revalidates() {
        let schema = Schema::new(vec![NamespaceSpec::new("endpoint").field(
            FieldSpec::new(
                "origins",
                "ALLOWED_ORIGINS",
                Caster::CommaList {
                    item: ItemCaster::Text,
                },
            )
            .with_default(Value::List(vec![])),
        )])
        .unwrap();

        let encoded = serde_json::to_string(&schema).unwrap();
        let decoded: Schema = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, schema);

        let duplicated = r#"[{"name":"a","fields":[]},{"name":"a","fields":[]}]"#;
        assert!(serde_json::from_str::<Schema>(duplicated).is_err());
    }
}
