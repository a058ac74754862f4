//! Switchboard CLI - resolve and inspect layered deployment configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging before any configuration is read.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Configuration resolution (see `crates/config`).
//!
//! Invariants:
//! - Command output goes to stdout; logs and errors go to stderr.
//! - Resolution is fail-fast: no partial snapshot is ever printed.

mod args;
mod commands;
mod dispatch;
mod error;
mod logging;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    tracing::debug!(
        env_dir = %cli.env_dir.display(),
        environment = %cli.environment,
        "starting"
    );

    let exit_code = match run_command(&cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
