//! Shared test utilities for switchboard integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Clear every variable the deployment schema reads so the host cannot leak in.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `API_TOKEN` is set to "test-token" unless overridden.

use assert_cmd::Command;

/// Variables read by the deployment schema or by the CLI itself.
pub const SCHEMA_VARS: &[&str] = &[
    "API_TOKEN",
    "ALLOWED_ORIGINS",
    "TRUSTED_PROXIES",
    "SERVICE_CREDENTIALS",
    "RUN_MODE",
    "CLUSTERING_ENABLED",
    "DNS_CLUSTER_QUERY",
    "NODE_BASENAME",
    "CLUSTER_STRATEGY",
    "SWITCHBOARD_ENV_DIR",
    "SWITCHBOARD_ENV",
    "RUST_LOG",
];

/// Returns a hermetic `switchboard` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `API_TOKEN` is set to a dummy value to satisfy the required field.
/// - Every other schema variable is cleared.
pub fn switchboard_cmd() -> Command {
    let mut cmd = bare_cmd();

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Satisfy configuration requirements
    cmd.env("API_TOKEN", "test-token");

    cmd
}

/// A `switchboard` command with dotenv loading enabled and no schema variables set.
#[allow(dead_code)]
pub fn dotenv_cmd(env_dir: &std::path::Path) -> Command {
    let mut cmd = bare_cmd();
    cmd.env_remove("DOTENV_DISABLED");
    cmd.arg("--env-dir").arg(env_dir);
    cmd
}

fn bare_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("switchboard");
    for var in SCHEMA_VARS {
        cmd.env_remove(var);
    }
    cmd
}
