//! The deployment's recognized variables.
//!
//! Responsibilities:
//! - Declare the static `Schema` every `switchboard` command resolves against.
//! - Name the cluster strategy backends a `CLUSTER_STRATEGY` may refer to.
//!
//! Invariants:
//! - Field order inside a namespace is the order failures are reported in.

use crate::cast::{Caster, ItemCaster, JsonShape, KeyStyle};
use crate::schema::{Decoder, FieldSpec, NamespaceSpec, Schema, SchemaError};
use crate::types::{ModuleRef, ModuleRegistry, Value};
use crate::validate::Validator;

/// Run modes accepted by `RUN_MODE`.
pub const RUN_MODES: [&str; 3] = ["server", "worker", "maintenance"];

/// Strategy used when `CLUSTER_STRATEGY` is unset.
pub const DEFAULT_CLUSTER_STRATEGY: &str = "dns_poll";

/// How cluster peers are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStrategy {
    /// Poll `DNS_CLUSTER_QUERY` for peer addresses.
    DnsPoll,
    Gossip,
    /// Fixed peer list, no discovery.
    Static,
}

/// Registry of the cluster strategies a `CLUSTER_STRATEGY` value can name.
pub fn cluster_strategies() -> ModuleRegistry<ClusterStrategy> {
    ModuleRegistry::new()
        .with(DEFAULT_CLUSTER_STRATEGY, ClusterStrategy::DnsPoll)
        .with("gossip", ClusterStrategy::Gossip)
        .with("static", ClusterStrategy::Static)
}

/// The schema of this deployment.
pub fn deployment_schema() -> Result<Schema, SchemaError> {
    Schema::new(vec![
        NamespaceSpec::new("endpoint")
            .field(
                FieldSpec::new("api_token", "API_TOKEN", Caster::String)
                    .required()
                    .sensitive()
                    .with_validator(Validator::NonEmpty),
            )
            .field(
                FieldSpec::new(
                    "allowed_origins",
                    "ALLOWED_ORIGINS",
                    Caster::CommaList {
                        item: ItemCaster::Text,
                    },
                )
                .with_default(Value::List(Vec::new())),
            )
            .field(
                FieldSpec::new(
                    "trusted_proxies",
                    "TRUSTED_PROXIES",
                    Caster::CommaList {
                        item: ItemCaster::IpOrCidr,
                    },
                )
                .with_default(Value::List(Vec::new()))
                .with_validator(Validator::each(Validator::Ip)),
            ),
        NamespaceSpec::new("secrets").field(
            FieldSpec::new(
                "service_credentials",
                "SERVICE_CREDENTIALS",
                Caster::Json {
                    shape: JsonShape::Map,
                    keys: KeyStyle::Atoms,
                },
            )
            .with_decoder(Decoder::OptionalBase64)
            .with_default(Value::Nil)
            .sensitive(),
        ),
        NamespaceSpec::new("runtime").field(
            FieldSpec::new("mode", "RUN_MODE", Caster::Atom)
                .with_default(Value::atom("server"))
                .with_validator(Validator::one_of(RUN_MODES)),
        ),
        NamespaceSpec::new("cluster")
            .field(FieldSpec::new("enabled", "CLUSTERING_ENABLED", Caster::Boolean).with_default(true))
            .field(FieldSpec::new("dns_query", "DNS_CLUSTER_QUERY", Caster::String))
            .field(FieldSpec::new("node_basename", "NODE_BASENAME", Caster::String))
            .field(
                FieldSpec::new("strategy", "CLUSTER_STRATEGY", Caster::ModuleRef)
                    .with_default(ModuleRef::new(DEFAULT_CLUSTER_STRATEGY)),
            ),
    ])
}
