//! Show command implementation.
//!
//! Responsibilities:
//! - Resolve the deployment schema and print it as pretty JSON.
//!
//! Invariants:
//! - Sensitive values are printed as `<redacted>`, never in clear.

use anyhow::{Result, anyhow};
use switchboard_config::deployment_schema;

use crate::args::Cli;

/// Run the show command, optionally limited to one namespace.
pub fn run(cli: &Cli, namespace: Option<&str>) -> Result<()> {
    let schema = deployment_schema()?;
    let snapshot = super::resolve(cli, &schema)?;

    let rendered = match namespace {
        Some(name) => snapshot
            .namespace(name)
            .ok_or_else(|| {
                let known: Vec<&str> = snapshot.namespaces().map(|(n, _)| n).collect();
                anyhow!("unknown namespace '{}' (known: {})", name, known.join(", "))
            })?
            .to_redacted_json(),
        None => snapshot.to_redacted_json(),
    };

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}
