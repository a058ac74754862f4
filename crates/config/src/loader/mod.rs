//! Configuration loader for dotenv files and the process environment.
//!
//! Responsibilities:
//! - Load layered `.env` files and overlay the live process environment.
//! - Provide a builder-pattern `ConfigLoader` that resolves a schema against the merged layers.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Casting or validating values (see `cast`, `validate`, `schema`).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest to highest: `.env` < `.env.{env}` < `.env.local` <
//!   `.env.{env}.local` < live environment.
//! - `load_dotenv()` must be called explicitly to enable dotenv file loading.
//! - The process environment is read, never written.

mod builder;
mod dotenv;
mod env;
mod error;
mod raw;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use dotenv::{DotenvLoader, load_files, parse_file, parse_str};
pub use env::{env_var_or_none, overlay, overlay_process_env, process_environment};
pub use error::ConfigError;
pub use raw::RawEnvironment;
