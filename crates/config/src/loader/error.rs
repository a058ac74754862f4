//! Error types for configuration resolution.
//!
//! Responsibilities:
//! - Define error variants for every fatal startup-resolution failure.
//! - Carry enough context (file and line, source variable, rule) to act on the message.
//!
//! Does NOT handle:
//! - Mapping errors to process exit codes (see the CLI crate).
//! - Caster-level failure detail (see `cast::CastError`, wrapped here).
//!
//! Invariants:
//! - Every variant is fatal; nothing in the pipeline retries or recovers.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - Values of sensitive fields appear only as `<redacted>`.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::cast::CastError;
use crate::schema::SchemaError;

/// Errors that can occur while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A dotenv file exists but has invalid syntax.
    ///
    /// SAFETY: Only the path and 1-based line number are reported, NOT the
    /// offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse {} at line {line}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    Parse { path: PathBuf, line: usize },

    /// A dotenv file exists but could not be read.
    #[error("Failed to read {}: {kind}", .path.display())]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error(
        "Failed to load {}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    DotenvUnknown { path: PathBuf },

    #[error("Missing required environment variable: {0}")]
    MissingRequiredConfig(String),

    #[error("Invalid value for {var}: {cause}")]
    InvalidConfigValue { var: String, cause: CastError },

    #[error("Invalid encoding for {var}: expected plain text or base64:-prefixed data")]
    InvalidEncoding { var: String },

    #[error("Validation failed for {var} (value {value}): {rule}: {message}")]
    Validation {
        var: String,
        value: String,
        rule: String,
        message: String,
    },

    #[error("Invalid configuration schema: {0}")]
    Schema(#[from] SchemaError),
}

impl ConfigError {
    /// Source variable the error is about, if it concerns a single variable.
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredConfig(var)
            | Self::InvalidConfigValue { var, .. }
            | Self::InvalidEncoding { var }
            | Self::Validation { var, .. } => Some(var),
            Self::Parse { .. }
            | Self::DotenvIo { .. }
            | Self::DotenvUnknown { .. }
            | Self::Schema(_) => None,
        }
    }
}
