//! Schema command implementation: print the deployment schema as JSON.

use anyhow::Result;
use switchboard_config::deployment_schema;

/// Run the schema command. Nothing is resolved.
pub fn run() -> Result<()> {
    let schema = deployment_schema()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
