//! Check command implementation.
//!
//! Responsibilities:
//! - Resolve the deployment schema and report success on stdout.
//! - Resolve the cluster strategy against the known backends when clustering is on.
//!
//! Does NOT handle:
//! - Printing resolved values (see `show`).

use anyhow::Result;
use switchboard_config::{cluster_strategies, deployment_schema};
use tracing::info;

use crate::args::Cli;

/// Run the check command.
pub fn run(cli: &Cli) -> Result<()> {
    let schema = deployment_schema()?;
    let snapshot = super::resolve(cli, &schema)?;

    let registry = cluster_strategies();
    let clustered = snapshot.get_bool("cluster", "enabled") == Some(true);
    if let Some(strategy) = snapshot
        .get_module("cluster", "strategy")
        .filter(|_| clustered)
    {
        let backend = strategy.resolve(&registry)?;
        info!(strategy = %strategy, ?backend, "cluster strategy resolved");
    }

    println!("configuration ok ({} namespaces)", snapshot.len());
    Ok(())
}
