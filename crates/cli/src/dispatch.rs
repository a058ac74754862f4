//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Check => commands::check::run(cli),
        Commands::Show { namespace } => commands::show::run(cli, namespace.as_deref()),
        Commands::Schema => commands::schema::run(),
    }
}
