//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that collects the dotenv layer and
//!   the live environment layer.
//! - Merge the layers into one `RawEnvironment` and evaluate a `Schema` against it.
//!
//! Does NOT handle:
//! - Dotenv parsing (delegated to dotenv.rs).
//! - Process environment access (delegated to env.rs).
//! - Casting and validation (delegated to the `schema` module).
//!
//! Invariants / Assumptions:
//! - Layers are kept apart until `raw()`/`build()`, so the live environment wins
//!   regardless of the order builder methods were called in.
//! - `load_dotenv()` must be called explicitly to enable dotenv file loading.
//! - The `DOTENV_DISABLED` variable is checked before any dotenv file is read.

use std::path::PathBuf;

use super::dotenv::DotenvLoader;
use super::env::{env_var_or_none, overlay, process_environment};
use super::error::ConfigError;
use super::raw::RawEnvironment;
use crate::constants::{DEFAULT_ENVIRONMENT, DOTENV_DISABLED_VAR};
use crate::schema::{self, ConfigSnapshot, Schema};

/// Configuration loader that resolves a schema from dotenv files and the environment.
pub struct ConfigLoader {
    env_dir: PathBuf,
    environment: String,
    files: RawEnvironment,
    live: RawEnvironment,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader for the default environment in the current directory.
    pub fn new() -> Self {
        Self {
            env_dir: PathBuf::from("."),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            files: RawEnvironment::new(),
            live: RawEnvironment::new(),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            env_var_or_none(DOTENV_DISABLED_VAR).as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Set the directory the dotenv files are read from.
    pub fn with_env_dir(mut self, dir: PathBuf) -> Self {
        self.env_dir = dir;
        self
    }

    /// Set the environment name selecting the per-environment dotenv layers.
    pub fn with_environment(mut self, environment: String) -> Self {
        self.environment = environment;
        self
    }

    /// Load the layered dotenv files (`.env`, `.env.{env}`, `.env.local`,
    /// `.env.{env}.local`).
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// no file is read (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A file exists but has invalid syntax (`ConfigError::Parse`)
    /// - A file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing files are silently ignored.
    pub fn load_dotenv(mut self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("dotenv loading disabled via {}", DOTENV_DISABLED_VAR);
            return Ok(self);
        }

        self.files = DotenvLoader::new(&self.env_dir, &self.environment).load()?;
        Ok(self)
    }

    /// Capture the live process environment as the highest-precedence layer.
    pub fn from_env(mut self) -> Self {
        self.live = process_environment();
        self
    }

    /// Use `vars` as the live environment layer instead of the process environment.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.live = vars.into_iter().collect();
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The merged raw mapping: dotenv layer with the live layer on top.
    pub fn raw(&self) -> RawEnvironment {
        overlay(self.files.clone(), self.live.iter())
    }

    /// Resolve `schema` against the merged layers.
    pub fn build(self, schema: &Schema) -> Result<ConfigSnapshot, ConfigError> {
        let raw = overlay(self.files, self.live.iter());
        tracing::debug!(
            environment = %self.environment,
            variables = raw.len(),
            "resolving configuration"
        );
        schema::evaluate(schema, &raw)
    }
}
