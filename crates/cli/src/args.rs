//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read the env directory and environment name from flags or variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve configuration (see `commands`).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use switchboard_config::constants::DEFAULT_ENVIRONMENT;

#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Resolve and inspect layered deployment configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  switchboard check\n  switchboard --environment prod show --namespace cluster\n  switchboard --env-dir /srv/app schema\n"
)]
pub struct Cli {
    /// Directory containing the `.env*` files
    #[arg(long, global = true, env = "SWITCHBOARD_ENV_DIR", default_value = ".")]
    pub env_dir: PathBuf,

    /// Environment name selecting `.env.{name}` and `.env.{name}.local`
    #[arg(long, global = true, env = "SWITCHBOARD_ENV", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and report whether it is valid
    Check,

    /// Resolve the configuration and print it as JSON, secrets redacted
    Show {
        /// Only print this namespace
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// Print the deployment schema as JSON without resolving anything
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["switchboard", "check"]).unwrap();
        assert_eq!(cli.env_dir, PathBuf::from("."));
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "switchboard",
            "show",
            "--namespace",
            "cluster",
            "--environment",
            "prod",
        ])
        .unwrap();
        assert_eq!(cli.environment, "prod");
        match cli.command {
            Commands::Show { namespace } => assert_eq!(namespace.as_deref(), Some("cluster")),
            other => panic!("expected show, got {other:?}"),
        }
    }
}
