//! Layered configuration resolution for switchboard deployments.
//!
//! This crate merges dotenv files and the live process environment into one
//! raw mapping, then casts and validates it against a declarative schema to
//! produce an immutable, namespaced `ConfigSnapshot`.

pub mod cast;
pub mod constants;
mod deployment;
mod loader;
pub mod schema;
pub mod types;
pub mod validate;

pub use deployment::{
    ClusterStrategy, DEFAULT_CLUSTER_STRATEGY, RUN_MODES, cluster_strategies, deployment_schema,
};
pub use loader::{
    ConfigError, ConfigLoader, DotenvLoader, RawEnvironment, env_var_or_none, load_files,
    overlay, overlay_process_env, parse_file, parse_str, process_environment,
};
pub use schema::{ConfigSnapshot, FieldSpec, Namespace, NamespaceSpec, Schema, SchemaError};
pub use types::{Value, ValueKind};
