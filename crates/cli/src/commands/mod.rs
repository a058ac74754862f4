//! CLI command implementations.

pub mod check;
pub mod schema;
pub mod show;

use anyhow::{Context, Result};
use switchboard_config::{ConfigLoader, ConfigSnapshot, Schema};

use crate::args::Cli;

/// Resolve `schema` from the env directory's dotenv files and the process environment.
pub fn resolve(cli: &Cli, schema: &Schema) -> Result<ConfigSnapshot> {
    let snapshot = ConfigLoader::new()
        .with_env_dir(cli.env_dir.clone())
        .with_environment(cli.environment.clone())
        .load_dotenv()
        .context("failed to load dotenv files")?
        .from_env()
        .build(schema)
        .context("failed to resolve configuration")?;
    Ok(snapshot)
}
